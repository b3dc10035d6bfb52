use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// The token is self-contained: whoever holds a validly signed, unexpired
/// token is `sub` until `exp`. Nothing about it is stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for `subject` expiring `ttl` from now.
    pub fn new(subject: impl ToString, ttl: Duration) -> Self {
        Self::issued_at(subject, Utc::now().timestamp(), ttl)
    }

    /// Create claims with an explicit issue time.
    ///
    /// # Arguments
    /// * `subject` - Identifier the token is bound to
    /// * `issued_at` - Unix timestamp in seconds
    /// * `ttl` - Lifetime; `exp = issued_at + ttl`
    pub fn issued_at(subject: impl ToString, issued_at: i64, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        }
    }

    /// Check whether the token has expired at `current_timestamp`.
    ///
    /// A token is expired from the `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
