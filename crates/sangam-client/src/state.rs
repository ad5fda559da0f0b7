//! Application state shared by all controllers.
//!
//! [`AppState`] is built once at startup and handed to each controller
//! behind an `Arc`.  It owns the API client, the local store, the query
//! cache, the event bus, and the feature gate.

use std::sync::{Arc, Mutex};

use tracing::info;

use sangam_api::{ApiClient, Result as ApiResult};
use sangam_shared::{is_profile_complete, Profile, UserRole};
use sangam_store::Database;

use crate::cache::{QueryCache, QueryKey};
use crate::config::ClientConfig;
use crate::events::EventBus;
use crate::gate::GateController;

/// Central application state.
pub struct AppState {
    /// Authenticated REST client.
    pub api: Arc<ApiClient>,

    /// Device-local store (search preferences, saved searches).  rusqlite
    /// connections are not `Sync`, hence the mutex.
    pub db: Arc<Mutex<Database>>,

    /// Process-wide query cache all views render from.
    pub cache: Arc<QueryCache>,

    /// Broadcast bus for toasts, modals, and navigation.
    pub events: EventBus,

    /// Reactive feature gate.
    pub gate: Arc<GateController>,

    /// Runtime configuration (base URL, poll intervals).
    pub config: ClientConfig,
}

impl AppState {
    /// Build state with the default on-disk database.
    pub fn new(config: ClientConfig) -> anyhow::Result<Arc<Self>> {
        let db = Database::new()?;
        Ok(Self::with_database(config, db))
    }

    /// Build state around an existing database handle (tests, custom
    /// layouts).
    pub fn with_database(config: ClientConfig, db: Database) -> Arc<Self> {
        Arc::new(Self {
            api: Arc::new(ApiClient::new(config.api_base_url.clone())),
            db: Arc::new(Mutex::new(db)),
            cache: Arc::new(QueryCache::new()),
            events: EventBus::new(),
            gate: Arc::new(GateController::new(UserRole::Member)),
            config,
        })
    }

    /// Install the session token and prime the gate from the server.
    pub async fn sign_in(&self, token: impl Into<String>) -> ApiResult<Profile> {
        self.api.set_token(token);
        let profile = self.refresh_own_profile().await?;
        info!(role = ?profile.role, "signed in");
        Ok(profile)
    }

    /// Refetch the member's own profile, updating the cache and both gate
    /// inputs derived from it.
    pub async fn refresh_own_profile(&self) -> ApiResult<Profile> {
        let profile = self.api.my_profile().await?;
        self.apply_own_profile(&profile);
        Ok(profile)
    }

    /// Record a fresh own-profile snapshot: cache it and re-derive the gate
    /// inputs.  Every mutation that returns the updated profile goes
    /// through here.
    pub fn apply_own_profile(&self, profile: &Profile) {
        self.cache.put(QueryKey::OwnProfile, profile);
        self.gate.set_role(profile.role);
        self.gate.set_profile_complete(is_profile_complete(profile));
    }
}
