//! Shared application state, passed to every handler by the dispatcher.
//! Collaborators are injected at construction so command code never touches
//! process globals and tests can swap in doubles.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::TtlCache;
use crate::commands::register::state::PendingRegistration;
use crate::constants::REGISTRATION_IDLE_SECS;
use crate::database::DbPool;
use crate::gateway::DataGateway;
use crate::ui::card::CardRenderer;

pub struct AppState {
    /// The SQLite connection pool holding credential records.
    pub db: DbPool,
    /// The remote game-data gateway; a trait object so tests inject doubles.
    pub gateway: Arc<dyn DataGateway>,
    /// Card rendering capability selected at startup.
    pub renderer: Arc<dyn CardRenderer>,
    /// In-flight registration conversations per user, idle-evicted.
    pub registrations: Mutex<TtlCache<PendingRegistration>>,
}

impl AppState {
    pub fn new(db: DbPool, gateway: Arc<dyn DataGateway>, renderer: Arc<dyn CardRenderer>) -> Self {
        Self {
            db,
            gateway,
            renderer,
            registrations: Mutex::new(TtlCache::new(Duration::from_secs(REGISTRATION_IDLE_SECS))),
        }
    }
}
