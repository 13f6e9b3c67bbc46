//! Shared state for one command run

use crate::OutputFormat;
use searchdish_api_client::models::{Role, User};
use searchdish_api_client::payload::ImageUpload;
use searchdish_api_client::storage::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};
use searchdish_api_client::{ApiClient, ApiError, ClientConfig, SessionError, SessionService};
use searchdish_cli::output;
use searchdish_core::config::Config;
use searchdish_core::validation::ValidationResult;
use searchdish_core::{Error as CoreError, ErrorCode};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Client, session and output settings resolved from config and environment
pub struct App {
    pub format: OutputFormat,
    pub session: SessionService,
    pub page_size: u32,
}

impl App {
    /// Resolve configuration and open the session store
    pub fn load(config_path: Option<&Path>, format: OutputFormat) -> Result<Self, CoreError> {
        let config = Config::load(config_path)?;
        let client_config = ClientConfig::from_config(&config)?;

        let store: Arc<dyn TokenStore> = match client_config.session_file_path() {
            Some(path) => {
                debug!(path = %path.display(), "Using session file");
                Arc::new(FileTokenStore::new(path))
            }
            None => Arc::new(MemoryTokenStore::new()),
        };

        let page_size = client_config.page_size;
        let client = ApiClient::new(client_config, store)?;

        Ok(Self {
            format,
            session: SessionService::new(client),
            page_size,
        })
    }

    pub fn client(&self) -> &ApiClient {
        self.session.client()
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Whether spinners and status lines should be drawn
    pub fn interactive(&self) -> bool {
        !self.is_json()
    }

    /// Restore the stored session and return the user
    pub async fn require_user(&self) -> Result<User, CoreError> {
        self.session.restore().await?;
        Ok(self.session.require_user()?)
    }

    /// Restore the stored session and check the user's role
    pub async fn require_role(&self, role: Role) -> Result<User, CoreError> {
        self.session.restore().await?;
        Ok(self.session.require_role(role)?)
    }
}

/// Reject a form before anything is sent, listing each failing field
pub fn check(result: ValidationResult, format: OutputFormat) -> Result<(), CoreError> {
    if !result.is_valid() && format == OutputFormat::Text {
        output::report_validation(&result);
    }
    result.to_result()
}

/// Read an image given on the command line
pub async fn load_image(path: Option<PathBuf>) -> Result<Option<ImageUpload>, CoreError> {
    let Some(path) = path else {
        return Ok(None);
    };
    ImageUpload::from_path(&path)
        .await
        .map(Some)
        .map_err(|e| CoreError::file_not_found(&path).with_context(e.to_string()))
}

/// Map whatever a command failed with onto a coded error
pub fn into_core_error(err: anyhow::Error) -> CoreError {
    let err = match err.downcast::<CoreError>() {
        Ok(core) => return core,
        Err(other) => other,
    };
    let err = match err.downcast::<SessionError>() {
        Ok(session) => return session.into(),
        Err(other) => other,
    };
    let err = match err.downcast::<ApiError>() {
        Ok(api) => return api.into(),
        Err(other) => other,
    };
    let err = match err.downcast::<StoreError>() {
        Ok(store) => return CoreError::session_store(store.to_string()).with_source(store),
        Err(other) => other,
    };
    CoreError::new(ErrorCode::Unknown, format!("{err:#}"))
}
