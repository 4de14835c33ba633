//! Role-tiered request throttling backed by Redis.
//!
//! Counts requests in fixed 60-second windows, one Redis key per
//! `{tier, identity, window}` bucket. The window arithmetic lives here as pure
//! functions; the Redis plumbing and axum layer live in `middleware`.

pub mod middleware;

use crate::models::user::Role;

pub const WINDOW_SECS: u64 = 60;

// Requests per minute per tier.
pub const RATE_LIMIT_PUBLIC: u32 = 30;
pub const RATE_LIMIT_USER: u32 = 100;
pub const RATE_LIMIT_ADMIN: u32 = 300;

/// Request-rate bucket. Picked per request from the bearer token:
/// admin token → Admin, any other valid token → Authenticated,
/// missing or invalid token → Public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Public,
    Authenticated,
    Admin,
}

impl Tier {
    pub fn for_role(role: Option<Role>) -> Tier {
        match role {
            Some(Role::Admin) => Tier::Admin,
            Some(_) => Tier::Authenticated,
            None => Tier::Public,
        }
    }

    pub fn limit(&self) -> u32 {
        match self {
            Tier::Public => RATE_LIMIT_PUBLIC,
            Tier::Authenticated => RATE_LIMIT_USER,
            Tier::Admin => RATE_LIMIT_ADMIN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Public => "public",
            Tier::Authenticated => "user",
            Tier::Admin => "admin",
        }
    }
}

/// Outcome of one request against its window counter.
#[derive(Debug, Clone, Copy)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_secs: u64,
}

pub fn window_index(now_secs: u64) -> u64 {
    now_secs / WINDOW_SECS
}

/// Seconds until the current window rolls over. Never zero: at an exact
/// boundary the new window has the full 60 seconds left.
pub fn seconds_until_reset(now_secs: u64) -> u64 {
    WINDOW_SECS - (now_secs % WINDOW_SECS)
}

pub fn bucket_key(tier: Tier, identity: &str, window: u64) -> String {
    format!("ratelimit:{}:{}:{}", tier.as_str(), identity, window)
}

/// Maps the post-increment counter value to a decision. `count` is the number
/// of requests seen in this window including the current one.
pub fn decide(count: u64, tier: Tier, now_secs: u64) -> RateDecision {
    let limit = tier.limit();
    RateDecision {
        allowed: count <= limit as u64,
        limit,
        remaining: (limit as u64).saturating_sub(count) as u32,
        reset_secs: seconds_until_reset(now_secs),
    }
}
