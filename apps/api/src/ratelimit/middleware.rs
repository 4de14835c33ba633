use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use redis::aio::ConnectionManager;
use tracing::warn;

use crate::auth::jwt::validate_token;
use crate::auth::middleware::bearer_token;
use crate::errors::AppError;
use crate::ratelimit::{bucket_key, decide, window_index, RateDecision, Tier, WINDOW_SECS};
use crate::state::AppState;

/// Outermost application layer: classifies the request into a tier, bumps the
/// window counter and rejects with 429 once the tier ceiling is crossed.
///
/// When Redis is unavailable the request is allowed and a warning is logged —
/// the API keeps serving without throttling rather than failing closed.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (tier, identity) = classify(&state, &request);
    let now_secs = unix_now_secs();

    let Some(redis) = state.redis.clone() else {
        return Ok(next.run(request).await);
    };

    let key = bucket_key(tier, &identity, window_index(now_secs));
    let decision = match bump_counter(redis, &key).await {
        Ok(count) => decide(count, tier, now_secs),
        Err(e) => {
            warn!("Rate limiter unavailable, allowing request: {e}");
            return Ok(next.run(request).await);
        }
    };

    if !decision.allowed {
        return Err(AppError::RateLimited {
            limit: decision.limit,
            retry_after_secs: decision.reset_secs,
        });
    }

    let mut response = next.run(request).await;
    stamp_headers(&mut response, &decision);
    Ok(response)
}

/// Tier and counter identity for one request. A valid bearer token keys the
/// bucket by user id; everything else is keyed by client IP.
fn classify(state: &AppState, request: &Request) -> (Tier, String) {
    if let Some(token) = bearer_token(request.headers()) {
        if let Ok(claims) = validate_token(token, &state.config.jwt_secret) {
            return (Tier::for_role(Some(claims.role)), claims.sub.to_string());
        }
    }

    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    (Tier::Public, ip)
}

/// INCR + EXPIRE in one atomic pipeline. The TTL is refreshed on every hit,
/// which only ever extends a key that dies with its window anyway.
async fn bump_counter(mut conn: ConnectionManager, key: &str) -> redis::RedisResult<u64> {
    let (count,): (u64,) = redis::pipe()
        .atomic()
        .incr(key, 1u32)
        .expire(key, WINDOW_SECS as i64)
        .ignore()
        .query_async(&mut conn)
        .await?;
    Ok(count)
}

fn stamp_headers(response: &mut Response, decision: &RateDecision) {
    let headers = response.headers_mut();
    if let Ok(v) = HeaderValue::from_str(&decision.limit.to_string()) {
        headers.insert("x-ratelimit-limit", v);
    }
    if let Ok(v) = HeaderValue::from_str(&decision.remaining.to_string()) {
        headers.insert("x-ratelimit-remaining", v);
    }
    if let Ok(v) = HeaderValue::from_str(&decision.reset_secs.to_string()) {
        headers.insert("x-ratelimit-reset", v);
    }
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
