use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Why a presented token was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Malformed token")]
    Malformed,
    #[error("Invalid token signature")]
    BadSignature,
    #[error("Token expired")]
    Expired,
}

/// JWT payload: the owner id under the standard `sub` claim, plus the
/// issuance and expiry timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// Signing and verification keys derived from the injected secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let jwt = &state.config.jwt;
        Self::new(&jwt.secret, Duration::from_secs(jwt.token_ttl_hours as u64 * 3600))
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issues a signed token for `user_id`, expiring `ttl` from now.
    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    /// Checks signature and expiry. Never panics on malformed input;
    /// every failure comes back as a typed `VerifyError`.
    pub fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        let validation = Validation::default();
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(user_id = %data.claims.sub, "jwt verified");
                Ok(data.claims)
            }
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => VerifyError::Expired,
                ErrorKind::InvalidSignature => VerifyError::BadSignature,
                _ => VerifyError::Malformed,
            }),
        }
    }
}

/// Extracts and validates the bearer token, yielding the owner id.
/// Handlers take this as an argument; the request never reaches them
/// without a valid token.
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthenticated("Missing Authorization header".into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthenticated("Invalid Authorization header".into()))?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            ApiError::from(e)
        })?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(secret, Duration::from_secs(3600))
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_never_resolves_to_another_owner() {
        let keys = make_keys("dev-secret");
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let claims = keys.verify(&keys.sign(alice).expect("sign")).expect("verify");
        assert_ne!(claims.sub, bob);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = make_keys("dev-secret");
        // craft a token whose expiry is well past the default leeway
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"dev-secret"),
        )
        .expect("encode");
        assert_eq!(keys.verify(&token), Err(VerifyError::Expired));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        // simulates a process restart with a freshly generated secret
        let old = make_keys("secret-before-restart");
        let new = make_keys("secret-after-restart");
        let token = old.sign(Uuid::new_v4()).expect("sign");
        assert_eq!(new.verify(&token), Err(VerifyError::BadSignature));
    }

    #[test]
    fn garbage_token_is_malformed_not_a_panic() {
        let keys = make_keys("dev-secret");
        assert_eq!(keys.verify("not-a-jwt"), Err(VerifyError::Malformed));
        assert_eq!(keys.verify(""), Err(VerifyError::Malformed));
    }
}
