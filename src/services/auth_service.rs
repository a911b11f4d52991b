use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::utils::AppError;

// JWT Claims: the caller's identity payload (including `jti`) plus the
// registered time claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: Map<String, Value>,
    pub iat: i64,              // issued at
    pub exp: i64,              // expiration
}

/// Claim names owned by the signer; an identity payload can't override them.
const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

/// Signs and verifies HS256 access tokens with the server secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token carrying `identity`, valid for the configured TTL.
    pub fn issue(&self, mut identity: Map<String, Value>) -> Result<String, AppError> {
        for reserved in RESERVED_CLAIMS {
            identity.remove(reserved);
        }
        // JWT ID: kept when the caller supplies one
        identity
            .entry("jti")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));

        let now = Utc::now();
        let claims = Claims {
            identity,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::TokenError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry. Every failure collapses into
    /// `Unauthorized`; the reason is only logged.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation.required_spec_claims.insert("exp".to_string());

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::warn!("❌ Invalid token: {}", e);
                AppError::Unauthorized
            })
    }
}
