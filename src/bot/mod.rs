pub mod commands;
pub mod handlers;
pub mod keyboards;
pub mod locks;
pub mod state;

use std::sync::Arc;

use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::timetable::{GroupCatalog, TimetableCache};
use locks::UserLocks;

/// Shared collaborators injected into every handler via dptree dependencies.
#[derive(Clone)]
pub struct AppContext {
    pub db: DatabaseManager,
    pub config: Arc<Config>,
    pub catalog: Arc<GroupCatalog>,
    pub cache: Arc<TimetableCache>,
    pub locks: UserLocks,
}

impl AppContext {
    pub fn new(
        db: DatabaseManager,
        config: Arc<Config>,
        catalog: Arc<GroupCatalog>,
        cache: Arc<TimetableCache>,
    ) -> Self {
        Self {
            db,
            config,
            catalog,
            cache,
            locks: UserLocks::default(),
        }
    }
}
