//! Session service
//!
//! Owns "who is logged in". State is published on a `watch` channel so any
//! number of observers can follow it; discrete transitions are also sent on a
//! `broadcast` channel so tests and UIs can see each one even when the watch
//! channel coalesces them.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, Role, User};
use crate::storage::{
    ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, StoreError, TokenStore, USER_ID_KEY, clear_session,
};
use searchdish_core::{Error as CoreError, ErrorCode};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// Message used when the server gives no reason for a failed login
pub const LOGIN_FAILED: &str = "Login failed";

const EVENT_CAPACITY: usize = 16;

/// Snapshot of the session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Logged-in user
    pub user: Option<User>,
    /// Whether a user is logged in
    pub is_authenticated: bool,
    /// Whether the initial restore is still running
    pub loading: bool,
}

impl SessionState {
    /// State before [`SessionService::restore`] has finished
    #[must_use]
    pub fn initial() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: true,
        }
    }

    fn anonymous() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: false,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Discrete session transitions
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A stored token was accepted; published before [`SessionEvent::Ready`]
    Restored(User),
    /// Credentials were accepted
    LoggedIn(User),
    /// The user logged out
    LoggedOut,
    /// The stored token was rejected and local credentials were cleared
    Expired,
    /// Loading finished
    Ready,
}

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// The backend refused the credentials
    #[error("{0}")]
    LoginFailed(String),

    /// The operation needs a logged-in user
    #[error("Not logged in")]
    NotAuthenticated,

    /// The logged-in user lacks the required role
    #[error("This action requires the {required} role")]
    Forbidden {
        /// Role the operation needs
        required: Role,
    },

    /// Request failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Token storage failed
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<SessionError> for CoreError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Api(api) => api.into(),
            SessionError::NotAuthenticated => CoreError::not_authenticated(),
            SessionError::Forbidden { required } => CoreError::forbidden(required),
            SessionError::LoginFailed(message) => CoreError::new(ErrorCode::NotAuthenticated, message)
                .with_suggestion("Check your email and password"),
            SessionError::Storage(e) => CoreError::session_store(e.to_string()).with_source(e),
        }
    }
}

/// Login state shared by every command
///
/// Late results of operations still in flight when [`shutdown`](Self::shutdown)
/// is called are dropped: they neither touch storage nor publish state.
pub struct SessionService {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    alive: AtomicBool,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("state", &*self.state.borrow())
            .field("alive", &self.is_alive())
            .finish_non_exhaustive()
    }
}

impl SessionService {
    /// Create a service sharing the client's token store
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let store = client.store();
        let (state, _) = watch::channel(SessionState::initial());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            client,
            store,
            state,
            events,
            alive: AtomicBool::new(true),
        }
    }

    /// Client the session authenticates
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Follow state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Follow discrete transitions
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Current state
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Stop publishing; in-flight operations finish without effect
    pub fn shutdown(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn publish(&self, state: SessionState, event: SessionEvent) {
        self.state.send_replace(state);
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn finish_loading(&self) {
        self.state.send_modify(|s| s.loading = false);
        let _ = self.events.send(SessionEvent::Ready);
    }

    /// Re-establish the session from a stored token
    ///
    /// - no token: anonymous
    /// - `auth/me` succeeds: logged in as the returned user
    /// - `auth/me` answers 401: local credentials are cleared
    /// - any other failure: anonymous, storage untouched, error returned
    ///
    /// `loading` is false afterwards in every case.
    pub async fn restore(&self) -> Result<Option<User>, SessionError> {
        if self
            .store
            .get(ACCESS_TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .is_none()
        {
            debug!("No stored token");
            if self.is_alive() {
                self.finish_loading();
            }
            return Ok(None);
        }

        let result = self.client.users().me().await;
        if !self.is_alive() {
            debug!("Session shut down during restore; dropping result");
            return Ok(None);
        }

        match result {
            Ok(user) => {
                debug!(user_id = %user.id, role = %user.role, "Session restored");
                let loading = self.state.borrow().loading;
                self.publish(
                    SessionState {
                        user: Some(user.clone()),
                        is_authenticated: true,
                        loading,
                    },
                    SessionEvent::Restored(user.clone()),
                );
                self.finish_loading();
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Stored token rejected; clearing session");
                clear_session(self.store.as_ref())?;
                self.publish(SessionState::anonymous(), SessionEvent::Expired);
                self.finish_loading();
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Could not restore session");
                self.state.send_replace(SessionState::anonymous());
                let _ = self.events.send(SessionEvent::Ready);
                Err(e.into())
            }
        }
    }

    /// Re-read the current user from the backend
    pub async fn refresh_user(&self) -> Result<Option<User>, SessionError> {
        self.restore().await
    }

    /// Log in and persist the token
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let request = LoginRequest::new(email, password);
        let response = self.client.users().login(&request).await.map_err(|e| {
            let message = e.server_message().unwrap_or(LOGIN_FAILED).to_string();
            debug!(error = %e, "Login rejected");
            SessionError::LoginFailed(message)
        })?;

        let user = response.user;
        if !self.is_alive() {
            return Ok(user);
        }

        self.store.set(ACCESS_TOKEN_KEY, &response.token.access_token)?;
        if let Some(refresh) = &response.token.refresh_token {
            self.store.set(REFRESH_TOKEN_KEY, refresh)?;
        }
        self.store.set(USER_ID_KEY, &user.id)?;

        info!(user_id = %user.id, role = %user.role, "Logged in");
        self.publish(
            SessionState {
                user: Some(user.clone()),
                is_authenticated: true,
                loading: false,
            },
            SessionEvent::LoggedIn(user.clone()),
        );
        Ok(user)
    }

    /// Forget the session locally (the backend is not told)
    pub fn logout(&self) -> Result<(), SessionError> {
        clear_session(self.store.as_ref())?;
        if self.is_alive() {
            self.publish(SessionState::anonymous(), SessionEvent::LoggedOut);
        }
        Ok(())
    }

    /// The logged-in user, or [`SessionError::NotAuthenticated`]
    pub fn require_user(&self) -> Result<User, SessionError> {
        self.state
            .borrow()
            .user
            .clone()
            .ok_or(SessionError::NotAuthenticated)
    }

    /// The logged-in user if they have `role`
    pub fn require_role(&self, role: Role) -> Result<User, SessionError> {
        let user = self.require_user()?;
        if user.role == role {
            Ok(user)
        } else {
            Err(SessionError::Forbidden { required: role })
        }
    }
}
