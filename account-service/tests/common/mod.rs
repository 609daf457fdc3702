use std::sync::Arc;
use std::sync::Mutex;

use account_service::domain::auth::errors::AuthError;
use account_service::domain::auth::models::NewUser;
use account_service::domain::auth::models::Token;
use account_service::domain::auth::models::TokenId;
use account_service::domain::auth::models::TokenType;
use account_service::domain::auth::ports::CredentialStore;
use account_service::domain::auth::ports::TokenStore;
use account_service::domain::auth::service::AuthService;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::inbound::http::router::create_router;
use async_trait::async_trait;
use auth::TokenCodec;
use serde_json::json;

pub const TEST_JWT_SECRET: &str =
    "dGVzdC1zZWNyZXQta2V5LWZvci1qd3Qtc2lnbmluZy1hdC1sZWFzdC0zMi1ieXRlcw==";

/// In-memory credential store standing in for Postgres.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn save(&self, user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|u| u.username.as_str() == user.username.as_str())
        {
            return Err(AuthError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.iter().any(|u| u.email.as_str() == user.email.as_str()) {
            return Err(AuthError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        let created = User {
            id: UserId(users.len() as i64 + 1),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
        };
        users.push(created.clone());
        Ok(created)
    }
}

/// In-memory token store; exposes its rows so tests can assert revocation.
#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: Mutex<Vec<Token>>,
}

impl InMemoryTokenStore {
    pub fn rows(&self) -> Vec<Token> {
        self.tokens.lock().unwrap().clone()
    }

    /// Rows with revoked=false and expired=false.
    pub fn live_rows(&self) -> Vec<Token> {
        self.rows()
            .into_iter()
            .filter(|t| !t.revoked && !t.expired)
            .collect()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn find_all_valid_by_user(&self, user_id: UserId) -> Result<Vec<Token>, AuthError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id && (!t.revoked || !t.expired))
            .cloned()
            .collect())
    }

    async fn save(&self, user_id: UserId, token: &str) -> Result<Token, AuthError> {
        let mut tokens = self.tokens.lock().unwrap();
        let created = Token {
            id: TokenId(tokens.len() as i64 + 1),
            token: token.to_string(),
            token_type: TokenType::Bearer,
            revoked: false,
            expired: false,
            user_id,
        };
        tokens.push(created.clone());
        Ok(created)
    }

    async fn save_all(&self, updated: Vec<Token>) -> Result<(), AuthError> {
        let mut tokens = self.tokens.lock().unwrap();
        for updated_token in updated {
            if let Some(existing) = tokens.iter_mut().find(|t| t.id == updated_token.id) {
                *existing = updated_token;
            }
        }
        Ok(())
    }
}

/// Test application that spawns a real server on a random port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_store: Arc<InMemoryTokenStore>,
    pub token_codec: Arc<TokenCodec>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_ttls(86_400, 604_800).await
    }

    /// Spawn with explicit token TTLs (negative TTLs issue already-expired
    /// tokens, useful for exercising the refresh no-op path).
    pub async fn spawn_with_ttls(access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_codec = Arc::new(
            TokenCodec::new(TEST_JWT_SECRET, access_ttl_secs, refresh_ttl_secs)
                .expect("Failed to build token codec"),
        );
        let credential_store = Arc::new(InMemoryCredentialStore::default());
        let token_store = Arc::new(InMemoryTokenStore::default());

        let auth_service = Arc::new(AuthService::new(
            credential_store,
            Arc::clone(&token_store),
            Arc::clone(&token_codec),
        ));

        let router = create_router(auth_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_store,
            token_codec,
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Register a user with default password/role and return the token pair.
    pub async fn register(&self, username: &str, email: &str) -> serde_json::Value {
        let response = self
            .post("/api/v1/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": "my_1secret1_password",
                "role": "USER"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/authenticate")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn refresh(&self, authorization: Option<&str>) -> reqwest::Response {
        let mut request = self.post("/api/v1/auth/refresh-token");
        if let Some(value) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }
        request.send().await.expect("Failed to execute request")
    }
}
