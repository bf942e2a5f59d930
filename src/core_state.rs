//! Application state shared by every screen.
//!
//! `CoreState` wires durable storage, navigation, the session service, the
//! REST client and the feedback sinks together once at startup. Screens
//! hold an `Arc<CoreState>` and never reach storage directly.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::{ClientConfig, DASHBOARD_PATH};
use crate::feedback::{Confirmer, Notifier};
use crate::layout::Sidebar;
use crate::models::User;
use crate::router::{resolve, Navigator, Resolution};
use crate::session::SessionService;
use crate::storage::{DurableStorage, FileStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("API client error: {0}")]
    Api(#[from] ApiError),
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    session: Arc<SessionService>,
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    pub sidebar: Sidebar,
}

impl CoreState {
    /// Wire the shell and hydrate the session from `storage`.
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn DurableStorage>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Result<Self, CoreError> {
        let navigator = Arc::new(Navigator::new("/"));
        let session = Arc::new(SessionService::new(storage, navigator));
        let api = ApiClient::new(config, session.clone())?;
        session.hydrate();
        tracing::info!(base_url = %api.config().base_url, "Core state ready");
        Ok(Self {
            session,
            api,
            notifier,
            confirmer,
            sidebar: Sidebar::new(),
        })
    }

    /// Production wiring: file-backed storage under the app data dir and
    /// the backend root from the environment.
    pub fn open_default(
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Result<Self, CoreError> {
        crate::init_tracing();
        let storage = Arc::new(FileStorage::open_default()?);
        Self::new(ClientConfig::from_env(), storage, notifier, confirmer)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        self.session.navigator()
    }

    pub fn storage(&self) -> &Arc<dyn DurableStorage> {
        self.session.storage()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn confirmer(&self) -> &dyn Confirmer {
        self.confirmer.as_ref()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    // ── Navigation ──────────────────────────────────────────

    /// Resolve the current location, following redirects.
    pub fn resolve_current(&self) -> Resolution {
        self.session
            .with_auth_view(|auth| resolve(&self.navigator().current(), auth))
    }

    /// Navigate to `path`, then apply the protected-route rules. Returns
    /// the final resolution.
    pub fn navigate(&self, path: &str) -> Resolution {
        self.navigator().push(path);
        let resolution = self.resolve_current();
        if let Resolution::Redirect(target) = &resolution {
            self.navigator().replace(target);
            return self.resolve_current();
        }
        resolution
    }

    pub fn go_to_dashboard(&self) -> Resolution {
        self.navigate(DASHBOARD_PATH)
    }
}
