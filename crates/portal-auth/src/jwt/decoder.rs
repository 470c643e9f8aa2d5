//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use portal_core::config::AuthConfig;
use portal_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        AppError::authentication("Invalid token issuer")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use portal_core::error::ErrorKind;
    use portal_entity::user::UserRole;
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.into(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let cfg = config("round-trip-secret");
        let user = Uuid::new_v4();
        let token = JwtEncoder::new(&cfg)
            .generate_access_token(user, UserRole::Rrhh, "mlopez")
            .unwrap();

        let claims = JwtDecoder::new(&cfg).decode_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), user);
        assert_eq!(claims.role, UserRole::Rrhh);
        assert_eq!(claims.username, "mlopez");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtEncoder::new(&config("one"))
            .generate_access_token(Uuid::new_v4(), UserRole::Admin, "admin")
            .unwrap();
        let err = JwtDecoder::new(&config("two"))
            .decode_access_token(&token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let mut other = config("shared");
        other.issuer = "someone-else".into();
        let token = JwtEncoder::new(&other)
            .generate_access_token(Uuid::new_v4(), UserRole::Usuario, "jdoe")
            .unwrap();
        let err = JwtDecoder::new(&config("shared"))
            .decode_access_token(&token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config("x"))
            .decode_access_token("not-a-token")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
