use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::JwtError;

/// JWT token handler for session tokens.
///
/// Uses HS256 (HMAC with SHA-256) keyed by a single shared secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a compact JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the wall clock.
    ///
    /// # Errors
    /// * `Malformed` - Token structure, encoding or claims are invalid
    /// * `InvalidSignature` - Signature does not match this handler's key
    /// * `Expired` - Current time is at or past `exp`
    pub fn decode(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Verify a token as of `now` (Unix timestamp, seconds).
    ///
    /// Signature is checked before expiry, so a forged expired token reports
    /// `InvalidSignature`. No leeway is applied to `exp`.
    pub fn decode_at(&self, token: &str, now: i64) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below without jsonwebtoken's leeway window.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        JwtError::InvalidSignature
                    }
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        if token_data.claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }
}
