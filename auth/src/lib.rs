//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the account service:
//! - Password hashing (Argon2id)
//! - Signed bearer token issuance and validation
//!
//! The service defines its own orchestration on top of these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenCodec;
//! use base64::Engine as _;
//!
//! let secret = base64::engine::general_purpose::STANDARD
//!     .encode(b"secret_key_at_least_32_bytes_long!!!");
//! let codec = TokenCodec::new(&secret, 86_400, 604_800).unwrap();
//!
//! let token = codec.issue_access_token("alice1", 42).unwrap();
//! assert_eq!(codec.extract_subject(&token).unwrap(), "alice1");
//! assert!(codec.is_valid(&token, "alice1"));
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
