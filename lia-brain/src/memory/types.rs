//! Memory Types - records and the links between them
//!
//! Records never point at each other directly. An association only stores
//! the target's id, and the store owns every record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::awakening::Insight;

/// Opaque, never-reused handle of a memory record
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryId(pub u64);

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mem-{}", self.0)
    }
}

/// A weighted link to another record
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Association {
    pub target: MemoryId,
    /// 0.0 to 1.0, identical on both ends of the link
    pub strength: f32,
    pub created_at: DateTime<Utc>,
}

/// Where a record came from
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum RecordOrigin {
    /// An accepted external experience
    Experience { platform: String },
    /// A reflective insight LIA produced herself
    Insight { payload: Insight },
}

/// A retained trace of an experience
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MemoryRecord {
    pub id: MemoryId,
    pub content: String,
    /// Concept key used by the world model
    pub kind: String,
    /// When the underlying event happened
    pub timestamp: DateTime<Utc>,
    /// How significant this memory is (0.0 to 1.0)
    pub importance: f32,
    /// Emotional tone (-1.0 to 1.0)
    pub emotional_valence: f32,
    /// Links in creation order
    pub associations: Vec<Association>,
    /// Grows each time the record is recalled (no upper bound)
    pub retrieval_strength: f32,
    pub last_accessed: DateTime<Utc>,
    pub origin: RecordOrigin,
}

impl MemoryRecord {
    /// Is this a reflective (insight) record?
    pub fn is_reflective(&self) -> bool {
        matches!(self.origin, RecordOrigin::Insight { .. })
    }

    /// Strength of the link to `target`, if any
    pub fn association_to(&self, target: MemoryId) -> Option<f32> {
        self.associations
            .iter()
            .find(|a| a.target == target)
            .map(|a| a.strength)
    }

    pub(crate) fn link(&mut self, target: MemoryId, strength: f32, at: DateTime<Utc>) {
        self.associations.push(Association {
            target,
            strength,
            created_at: at,
        });
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.retrieval_strength = (self.retrieval_strength + 0.1).max(0.0);
        self.last_accessed = now;
    }
}
