use std::sync::Arc;

use crate::api::{AuthApi, HttpApi};
use crate::config::Config;
use crate::session::{SessionManager, SessionStore};

/// Shared handles the shell threads through every screen.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<SessionStore>,
    pub session: Arc<SessionManager>,
    pub api: Arc<HttpApi>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(SessionStore::new(config.session_file.clone()));
        let api = Arc::new(HttpApi::new(
            config.api_base_url.clone(),
            Arc::clone(&store),
        ));
        let session = Arc::new(SessionManager::new(
            Arc::clone(&api) as Arc<dyn AuthApi>,
            Arc::clone(&store),
        ));
        Self {
            config,
            store,
            session,
            api,
        }
    }
}
