//! Contact form endpoint

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{ContactMessage, User};
use serde_json::Value;

/// Contact API interface
#[derive(Clone, Debug)]
pub struct ContactApi {
    client: ApiClient,
}

impl ContactApi {
    /// Create a new contact API interface
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Send a message on behalf of `sender`
    ///
    /// POST /contact. The sender's id and account email are attached; the
    /// form's own name and email fall back to the account's when left blank.
    pub async fn send(&self, sender: &User, mut message: ContactMessage) -> ApiResult<Value> {
        message.user_id.clone_from(&sender.id);
        message.user_email.clone_from(&sender.email);
        if message.name.trim().is_empty() {
            message.name = sender.display_name().to_string();
        }
        if message.email.trim().is_empty() {
            message.email.clone_from(&sender.email);
        }
        self.client.post("contact", &message).await
    }
}
