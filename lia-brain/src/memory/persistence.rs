//! Persistence types for LIA's memory stream
//!
//! The snapshot is what the persistence sink writes on shutdown and what
//! the store is rebuilt from on the next start.

use serde::{Deserialize, Serialize};

use super::types::{MemoryId, MemoryRecord};
use super::MemoryStats;

/// Current snapshot format version
pub const MEMORY_SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to rebuild a MemoryStore
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MemorySnapshot {
    /// Format version (for future migrations)
    pub version: u32,
    /// Next id to hand out; ids are never reused across restarts
    pub next_id: u64,
    /// All records, in timeline order
    pub records: Vec<MemoryRecord>,
    /// Insertion order
    pub timeline: Vec<MemoryId>,
    /// Lifetime counters
    #[serde(default)]
    pub stats: MemoryStats,
}

impl MemorySnapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
