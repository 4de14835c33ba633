use anyhow::{Context, Result};

/// Default admin credentials seeded at startup when no admin account exists.
/// Documented for local development only — override both in any real deployment.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@university.edu";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub admin_email: String,
    pub admin_password: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            token_ttl_minutes: std::env::var("TOKEN_TTL_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<i64>()
                .context("TOKEN_TTL_MINUTES must be a positive integer")?,
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// True while the documented development password is still in effect.
    pub fn admin_password_is_default(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
