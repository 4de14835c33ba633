//! JWT issuance and validation. HS256 over `JWT_SECRET`, with the claim set
//! `{sub, email, role, iat, exp}`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues a signed token for the given identity, expiring `ttl_minutes` from now.
pub fn issue_token(
    user_id: Uuid,
    email: &str,
    role: Role,
    secret: &str,
    ttl_minutes: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
    };
    sign(&claims, secret)
}

fn sign(claims: &Claims, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {e}")))
}

/// Validates signature and expiry. Any failure maps to 401 — callers never
/// learn whether the token was malformed, expired, or forged.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issued_token_carries_identity() {
        let id = Uuid::new_v4();
        let token = issue_token(id, "alice@university.edu", Role::Student, SECRET, 60).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "alice@university.edu");
        assert_eq!(claims.role, Role::Student);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        // Past the default 60s validation leeway.
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "old@university.edu".to_string(),
            role: Role::Student,
            iat: now - 3600,
            exp: now - 300,
        };
        let token = sign(&claims, SECRET).unwrap();
        assert!(matches!(
            validate_token(&token, SECRET),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token =
            issue_token(Uuid::new_v4(), "a@b.edu", Role::Admin, SECRET, 60).unwrap();
        assert!(matches!(
            validate_token(&token, "other-secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(
            validate_token("not.a.jwt", SECRET),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_admin_role_survives_the_claim_set() {
        let token = issue_token(Uuid::new_v4(), "a@b.edu", Role::Admin, SECRET, 60).unwrap();
        assert_eq!(validate_token(&token, SECRET).unwrap().role, Role::Admin);
    }
}
