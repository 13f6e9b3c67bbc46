//! Authentication and user endpoints

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{AuthResponse, LoginRequest, RegisterDto, User};
use serde::Deserialize;
use serde_json::Value;

/// Registration may answer with the user or with `{ user }`
#[derive(Deserialize)]
#[serde(untagged)]
enum UserEnvelope {
    Wrapped { user: User },
    Bare(User),
}

/// Users API interface
#[derive(Clone, Debug)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    /// Create a new users API interface
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token
    ///
    /// POST /auth/login
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.client.post("auth/login", request).await
    }

    /// Fetch the user the stored token belongs to
    ///
    /// GET /auth/me
    pub async fn me(&self) -> ApiResult<User> {
        self.client.get("auth/me").await
    }

    /// Create an account
    ///
    /// POST /auth/register
    pub async fn register(&self, dto: &RegisterDto) -> ApiResult<User> {
        let envelope: UserEnvelope = self.client.post("auth/register", dto).await?;
        Ok(match envelope {
            UserEnvelope::Wrapped { user } | UserEnvelope::Bare(user) => user,
        })
    }

    /// Activate a user account (admin)
    ///
    /// PATCH /users/{id}
    pub async fn activate(&self, user_id: &str) -> ApiResult<Value> {
        self.client.patch_empty(&format!("users/{user_id}")).await
    }
}
