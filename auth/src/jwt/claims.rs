use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Claims carried by every token this service issues.
///
/// `sub` holds the username, `user_id` the numeric account identifier.
/// Additional custom claims are flattened into the token payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Owning account identifier
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for a subject with an explicit issue/expiry window.
    pub fn new(subject: impl ToString, user_id: i64, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: expires_at,
            user_id,
            extra: HashMap::new(),
        }
    }

    /// Add a custom claim.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Whether the token's expiry has passed.
    ///
    /// Expiry is strict: a token is still valid at the exact expiry instant,
    /// expired only once `exp < now`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
