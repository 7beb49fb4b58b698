use crate::domain::{BlogError, CurrentUser};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims issued by the external user subsystem. This module only
/// verifies them; `generate_token` mirrors the issuing side for tests.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    pub permissions: u32,
    pub exp: usize,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Result<Self, BlogError> {
        if secret.len() < 32 {
            tracing::warn!(
                "JWT secret is too short ({} chars). Minimum recommended is 32 chars.",
                secret.len()
            );
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    #[allow(dead_code)]
    pub fn generate_token(&self, user: &CurrentUser) -> Result<String, BlogError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(24))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            user_id: user.id,
            username: user.username.clone(),
            permissions: user.permissions,
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {}", e);
            BlogError::Internal(format!("Failed to generate token: {}", e))
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<CurrentUser, BlogError> {
        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(token_data) => {
                let claims = token_data.claims;
                tracing::debug!("Token verified for user_id: {}", claims.user_id);
                Ok(CurrentUser {
                    id: claims.user_id,
                    username: claims.username,
                    permissions: claims.permissions,
                })
            }
            Err(e) => Err(BlogError::Unauthorized(format!("Invalid token: {}", e))),
        }
    }
}
