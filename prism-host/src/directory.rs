//! Player record lookups backing per-player menu state (theme choice).

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

/// The per-player record menus read. `theme_id` selects themed menu
/// assets (arrow icons, backgrounds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub uuid: Uuid,
    pub theme_id: String,
}

/// Synchronous lookup of player records. Paginated rendering treats a
/// missing record as a hard precondition failure, so implementations
/// must answer from a warm cache.
pub trait PlayerDirectory: Send + Sync {
    fn find(&self, uuid: Uuid) -> Option<PlayerRecord>;
}

/// In-memory directory used by tests and single-server setups.
#[derive(Default)]
pub struct StaticDirectory {
    records: RwLock<HashMap<Uuid, PlayerRecord>>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: PlayerRecord) {
        self.records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(record.uuid, record);
    }
}

impl PlayerDirectory for StaticDirectory {
    fn find(&self, uuid: Uuid) -> Option<PlayerRecord> {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&uuid)
            .cloned()
    }
}
