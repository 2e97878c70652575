//! Token minting and verification bound to a single secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use super::claims::Claims;

/// Errors produced by the token codec.
///
/// The distinction between variants is internal to this crate. The service
/// layer collapses every verification failure into one opaque error kind so
/// callers cannot observe which check failed.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Claims serialization failed during minting.
    #[error("failed to encode token")]
    Encoding(#[source] jsonwebtoken::errors::Error),
    /// The token's lifetime has elapsed.
    #[error("token has expired")]
    Expired,
    /// The signature does not match this codec's secret.
    #[error("invalid token signature")]
    InvalidSignature,
    /// The token is structurally malformed.
    #[error("malformed token")]
    Malformed,
}

/// Encodes and verifies signed session tokens (HMAC-SHA256).
///
/// One codec instance is bound to one secret and one lifetime. The identity
/// service holds two codecs — refresh and access — built from distinct
/// secrets, so a token of one kind never verifies under the other.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec bound to the given secret and token lifetime.
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        }
    }

    /// Mints a signed token for the given subject.
    ///
    /// Sets `iat` to now and `exp` to now plus this codec's lifetime.
    pub fn mint(&self, sub: Uuid, email: &str, role: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Encoding)
    }

    /// Verifies a token against this codec's secret and returns its claims.
    ///
    /// Checks the signature first, then the expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    _ => TokenError::Malformed,
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> (Uuid, &'static str, &'static str) {
        (Uuid::new_v4(), "alice@example.com", "user")
    }

    #[test]
    fn test_mint_verify_roundtrip() {
        let codec = TokenCodec::new("test-secret", Duration::minutes(15));
        let (sub, email, role) = subject();

        let token = codec.mint(sub, email, role).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email, email);
        assert_eq!(claims.role, role);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_secret_isolation() {
        let refresh = TokenCodec::new("refresh-secret", Duration::hours(24));
        let access = TokenCodec::new("access-secret", Duration::minutes(15));
        let (sub, email, role) = subject();

        let refresh_token = refresh.mint(sub, email, role).unwrap();
        let access_token = access.mint(sub, email, role).unwrap();

        assert!(matches!(
            access.verify(&refresh_token),
            Err(TokenError::InvalidSignature)
        ));
        assert!(matches!(
            refresh.verify(&access_token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative lifetime mints a token whose expiry is already past the
        // validation leeway, with a signature that is still valid.
        let codec = TokenCodec::new("test-secret", Duration::hours(-1));
        let (sub, email, role) = subject();

        let token = codec.mint(sub, email, role).unwrap();
        assert!(matches!(codec.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let codec = TokenCodec::new("test-secret", Duration::minutes(15));
        assert!(matches!(
            codec.verify("not-a-token"),
            Err(TokenError::Malformed)
        ));
    }
}
