//! Core JWT handler implementation

use super::types::{Claims, JwtHandler};
use crate::auth::types::Identity;
use crate::config::AuthConfig;
use crate::utils::error::{AdminError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: config.issuer.clone(),
        }
    }

    /// Token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.expiration
    }

    /// Create an access token for a subject
    pub fn create_access_token(&self, subject: &str, role: Option<&str>) -> Result<String> {
        if subject.trim().is_empty() {
            return Err(AdminError::unauthorized("Token subject cannot be empty"));
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AdminError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: subject.to_string(),
            role: role.map(str::to_string),
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)?;

        debug!("Created access token for subject: {}", subject);
        Ok(token)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            AdminError::Jwt(e)
        })?;

        debug!("Token verified for subject: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Verify a token and turn its claims into a request identity
    pub fn authenticate(&self, token: &str) -> Result<Identity> {
        let claims = self.verify_token(token)?;
        Ok(Identity::new(claims.sub, claims.role))
    }
}
