//! Session lifecycle: the persisted credential, its restore-once startup
//! path, and the login/logout operations that are its only writers.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::AuthApi;
use crate::models::{Credential, Identity, RegisterRequest, Role};

pub mod store;

pub use store::{SessionError, SessionPhase, SessionState, SessionStore};

/// Result of a login attempt. Failures are values, not errors — nothing at
/// this boundary may leak a raw `ApiError` into the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success { role: Role },
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Success,
    Failure { message: String },
}

/// The single writer of the session store.
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: Arc<SessionStore>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    /// Runs once at startup: trust-on-read restore of the persisted
    /// credential. No network call is made — an invalid token shows up as a
    /// 401 on the first authenticated request instead.
    ///
    /// Always transitions the store out of `Restoring`, even when the file
    /// is missing or unreadable.
    pub fn restore(&self) {
        match self.store.load_from_disk() {
            Ok(Some(credential)) => {
                debug!(role = %credential.role, "restored persisted session");
                self.store.set_credential(credential);
            }
            Ok(None) => self.store.mark_ready(),
            Err(e) => {
                warn!("ignoring unreadable session file: {e}");
                self.store.mark_ready();
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self.api.login(email, password).await {
            Ok(response) => {
                let credential = Credential {
                    token: response.access_token,
                    role: response.role,
                };
                if let Err(e) = self.store.save_to_disk(&credential) {
                    // The session still works in memory; it just won't
                    // survive a restart.
                    warn!("could not persist session: {e}");
                }
                self.store.set_credential(credential);
                info!(role = %response.role, "logged in");
                LoginOutcome::Success {
                    role: response.role,
                }
            }
            Err(e) => LoginOutcome::Failure {
                message: e.message_or("Login failed").to_string(),
            },
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> RegisterOutcome {
        match self.api.register(request).await {
            Ok(()) => RegisterOutcome::Success,
            Err(e) => RegisterOutcome::Failure {
                message: e.message_or("Registration failed. Try again.").to_string(),
            },
        }
    }

    /// Unconditional and idempotent; never requires a round trip.
    pub fn logout(&self) {
        if let Err(e) = self.store.remove_from_disk() {
            warn!("could not remove session file: {e}");
        }
        self.store.clear_credential();
        info!("logged out");
    }

    pub fn identity(&self) -> Option<Identity> {
        self.store.identity()
    }
}
