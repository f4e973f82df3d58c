use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One group the remote provider knows about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    /// The provider's internal numeric identifier, distinct from the name.
    pub id: i64,
}

/// The list of valid groups, loaded once per process and read-only afterwards.
#[derive(Debug, Default)]
pub struct GroupCatalog {
    entries: Vec<GroupEntry>,
}

impl GroupCatalog {
    /// Loads the catalog from a JSON array of `{name, id}` objects.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow!("failed to read group catalog {}: {e}", path.display()))?;
        let entries = serde_json::from_slice(&bytes)
            .map_err(|e| anyhow!("group catalog {} is malformed: {e}", path.display()))?;
        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<GroupEntry>) -> Self {
        Self { entries }
    }

    /// Case-insensitive exact match; `None` when the group is not listed.
    pub fn resolve(&self, name: &str) -> Option<i64> {
        let wanted = name.trim().to_uppercase();
        self.entries
            .iter()
            .find(|entry| entry.name.to_uppercase() == wanted)
            .map(|entry| entry.id)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
