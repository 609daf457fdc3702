use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Codec for the signed bearer tokens the service issues.
///
/// Signs with HMAC-SHA256 using a key derived from a base64-encoded secret.
/// Produces two variants with the same encoding: short-lived access tokens
/// and longer-lived refresh tokens, differing only in TTL. The secret and
/// both TTLs are fixed at construction and never rotated at runtime.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from a base64-encoded secret and the two token TTLs.
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is not valid base64
    ///
    /// # Security Notes
    /// - The decoded secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(
        base64_secret: &str,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Result<Self, JwtError> {
        let key_bytes = BASE64
            .decode(base64_secret)
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&key_bytes),
            decoding_key: DecodingKey::from_secret(&key_bytes),
            algorithm: Algorithm::HS256,
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        })
    }

    /// Issue an access token for a subject.
    pub fn issue_access_token(&self, subject: &str, user_id: i64) -> Result<String, JwtError> {
        self.issue(subject, user_id, HashMap::new(), self.access_ttl)
    }

    /// Issue a refresh token for a subject.
    pub fn issue_refresh_token(&self, subject: &str, user_id: i64) -> Result<String, JwtError> {
        self.issue(subject, user_id, HashMap::new(), self.refresh_ttl)
    }

    /// Issue a signed token with custom extra claims and TTL.
    ///
    /// Embeds the subject, the `userId` claim, the issued-at timestamp, and
    /// an expiry of `now + ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        user_id: i64,
        extra_claims: HashMap<String, serde_json::Value>,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let mut claims = Claims::new(subject, user_id, now.timestamp(), (now + ttl).timestamp());
        claims.extra = extra_claims;

        let header = Header::new(self.algorithm);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Extract the subject (username) from a token.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature does not verify or the token is malformed
    pub fn extract_subject(&self, token: &str) -> Result<String, JwtError> {
        self.extract_claim(token, |claims| claims.sub.clone())
    }

    /// Extract an arbitrary claim through a resolver over the decoded claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature does not verify or the token is malformed
    pub fn extract_claim<T>(
        &self,
        token: &str,
        resolver: impl FnOnce(&Claims) -> T,
    ) -> Result<T, JwtError> {
        let claims = self.decode_claims(token)?;
        Ok(resolver(&claims))
    }

    /// Whether a token is valid for the expected subject.
    ///
    /// True iff the subject matches exactly and the expiry has not passed.
    /// A token is still valid at the exact expiry instant.
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> bool {
        match self.decode_claims(token) {
            Ok(claims) => {
                claims.sub == expected_subject && !claims.is_expired(Utc::now().timestamp())
            }
            Err(_) => false,
        }
    }

    /// Verify the signature and deserialize the claims.
    ///
    /// Expiry is judged by callers against the decoded `exp`, so the refresh
    /// flow can still read claims of a token it will reject as expired.
    fn decode_claims(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}
