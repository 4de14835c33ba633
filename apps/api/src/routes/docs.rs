//! Interactive API documentation served at `/docs`, rendered from a static
//! endpoint catalog. The same catalog backs `/docs/openapi.json`.

use axum::{response::Html, Json};
use serde_json::{json, Map, Value};

use crate::ratelimit::{RATE_LIMIT_ADMIN, RATE_LIMIT_PUBLIC, RATE_LIMIT_USER};

pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
    /// "none" | "bearer" | "admin"
    pub auth: &'static str,
}

pub const ENDPOINTS: &[EndpointDoc] = &[
    EndpointDoc {
        method: "GET",
        path: "/health",
        summary: "Service liveness and version",
        auth: "none",
    },
    EndpointDoc {
        method: "GET",
        path: "/docs",
        summary: "This documentation page",
        auth: "none",
    },
    EndpointDoc {
        method: "POST",
        path: "/api/v1/auth/token",
        summary: "Exchange email and password for a JWT",
        auth: "none",
    },
    EndpointDoc {
        method: "POST",
        path: "/api/v1/auth/register",
        summary: "Create a student account",
        auth: "none",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/v1/auth/me",
        summary: "The authenticated identity",
        auth: "bearer",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/v1/faculty",
        summary: "Search faculty (q, department, interest, accepting_students, paging)",
        auth: "bearer",
    },
    EndpointDoc {
        method: "POST",
        path: "/api/v1/faculty",
        summary: "Create a faculty profile",
        auth: "admin",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/v1/faculty/:id",
        summary: "Fetch one faculty profile",
        auth: "bearer",
    },
    EndpointDoc {
        method: "PUT",
        path: "/api/v1/faculty/:id",
        summary: "Replace a faculty profile",
        auth: "admin",
    },
    EndpointDoc {
        method: "DELETE",
        path: "/api/v1/faculty/:id",
        summary: "Delete a faculty profile",
        auth: "admin",
    },
    EndpointDoc {
        method: "POST",
        path: "/api/v1/resumes",
        summary: "Upload a resume (multipart 'file': PDF or plain text)",
        auth: "bearer",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/v1/resumes/me",
        summary: "The caller's stored resume",
        auth: "bearer",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/v1/match",
        summary: "Rank all faculty by compatibility with the caller's resume",
        auth: "bearer",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/v1/match/faculty/:id",
        summary: "Score the caller's resume against one faculty profile",
        auth: "bearer",
    },
];

/// GET /docs
pub async fn docs_page() -> Html<String> {
    let mut rows = String::new();
    for e in ENDPOINTS {
        rows.push_str(&format!(
            "<tr><td><code>{}</code></td><td><code>{}</code></td><td>{}</td><td>{}</td></tr>\n",
            e.method, e.path, e.summary, e.auth
        ));
    }
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Faculty Match API</title>
<style>
body {{ font-family: sans-serif; margin: 2rem auto; max-width: 64rem; }}
table {{ border-collapse: collapse; width: 100%; }}
td, th {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }}
code {{ background: #f4f4f4; padding: 0.1rem 0.3rem; }}
</style>
</head>
<body>
<h1>Faculty Match API</h1>
<p>Authenticate via <code>POST /api/v1/auth/token</code> and send the result as
<code>Authorization: Bearer &lt;token&gt;</code>.</p>
<p>Rate limits per minute: {public} (no token), {user} (authenticated), {admin} (admin).
Exceeding a limit returns <code>429 Too Many Requests</code> with a
<code>Retry-After</code> header. Rate-limited traffic carries
<code>X-RateLimit-Limit</code>, <code>X-RateLimit-Remaining</code> and
<code>X-RateLimit-Reset</code> headers; the headers are absent while the
limiter's cache is unreachable and requests are served unthrottled.</p>
<table>
<tr><th>Method</th><th>Path</th><th>Summary</th><th>Auth</th></tr>
{rows}</table>
<p>Machine-readable catalog: <a href="/docs/openapi.json">/docs/openapi.json</a></p>
</body>
</html>
"#,
        public = RATE_LIMIT_PUBLIC,
        user = RATE_LIMIT_USER,
        admin = RATE_LIMIT_ADMIN,
        rows = rows
    );
    Html(html)
}

/// Converts axum's `:id` path captures to OpenAPI's `{id}` form.
fn openapi_path(path: &str) -> String {
    path.split('/')
        .map(|seg| match seg.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => seg.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// GET /docs/openapi.json
pub async fn openapi_json() -> Json<Value> {
    let mut paths = Map::new();
    for e in ENDPOINTS {
        let path = openapi_path(e.path);
        let entry = paths
            .entry(path)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(methods) = entry {
            let mut op = Map::new();
            op.insert("summary".to_string(), json!(e.summary));
            if e.auth != "none" {
                op.insert("security".to_string(), json!([{"bearerAuth": []}]));
            }
            methods.insert(e.method.to_lowercase(), Value::Object(op));
        }
    }

    Json(json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Faculty Match API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Faculty search, resume upload and compatibility scoring."
        },
        "components": {
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
            }
        },
        "paths": Value::Object(paths)
    }))
}
