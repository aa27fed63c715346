//! World Model - what LIA believes about the world
//!
//! Every record kind is a concept. Each new memory of that kind pulls the
//! concept's confidence halfway towards the memory's importance.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::memory::{MemoryId, MemoryRecord};

/// Confidence a concept starts with on first sighting
const INITIAL_CONFIDENCE: f32 = 0.5;

/// Belief count at which the world feels fully complex
const COMPLEXITY_SCALE: f32 = 100.0;

/// Domain reported with every complexity gap
pub const GAP_DOMAIN: &str = "emerging_patterns";

/// Current snapshot format version
pub const WORLD_SNAPSHOT_VERSION: u32 = 1;

/// Aggregated confidence about one concept
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Belief {
    /// 0.0 to 1.0
    pub confidence: f32,
    /// Memories that shaped this belief
    pub source_ids: Vec<MemoryId>,
    pub first_observed: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Result of folding new memories into the model
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldUpdate {
    /// How much of the world is still unexplained (0.0 to 1.0)
    pub complexity_gap: f32,
    pub gap_domain: String,
}

/// What the persistence sink stores
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub version: u32,
    pub beliefs: Vec<(String, Belief)>,
    pub complexity: f32,
}

#[derive(Default)]
pub struct WorldModel {
    beliefs: HashMap<String, Belief>,
    complexity: f32,
}

impl WorldModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: WorldSnapshot) -> Self {
        let beliefs: HashMap<String, Belief> = snapshot.beliefs.into_iter().collect();
        let complexity = complexity_of(beliefs.len());
        tracing::info!("World model restored: {} beliefs", beliefs.len());
        Self { beliefs, complexity }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut beliefs: Vec<(String, Belief)> = self
            .beliefs
            .iter()
            .map(|(k, b)| (k.clone(), b.clone()))
            .collect();
        beliefs.sort_by(|a, b| a.0.cmp(&b.0));
        WorldSnapshot {
            version: WORLD_SNAPSHOT_VERSION,
            beliefs,
            complexity: self.complexity,
        }
    }

    /// Fold new memories into the beliefs
    pub fn update(&mut self, records: &[MemoryRecord]) -> WorldUpdate {
        let now = Utc::now();
        for record in records {
            let observed = record.importance.min(1.0);
            let belief = self
                .beliefs
                .entry(record.kind.clone())
                .or_insert_with(|| Belief {
                    confidence: INITIAL_CONFIDENCE,
                    source_ids: Vec::new(),
                    first_observed: now,
                    last_updated: now,
                });
            belief.confidence = lia_core::clamp01((belief.confidence + observed) / 2.0);
            belief.last_updated = now;
            belief.source_ids.push(record.id);
        }

        self.complexity = complexity_of(self.beliefs.len());
        WorldUpdate {
            complexity_gap: (1.0 - self.complexity).max(0.0),
            gap_domain: GAP_DOMAIN.to_string(),
        }
    }

    pub fn get_complexity(&self) -> f32 {
        self.complexity
    }

    pub fn belief(&self, concept: &str) -> Option<&Belief> {
        self.beliefs.get(concept)
    }

    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }
}

fn complexity_of(belief_count: usize) -> f32 {
    (belief_count as f32 / COMPLEXITY_SCALE).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RecordOrigin;

    fn record(id: u64, kind: &str, importance: f32) -> MemoryRecord {
        let now = Utc::now();
        MemoryRecord {
            id: MemoryId(id),
            content: format!("record {id}"),
            kind: kind.to_string(),
            timestamp: now,
            importance,
            emotional_valence: 0.0,
            associations: Vec::new(),
            retrieval_strength: 1.0,
            last_accessed: now,
            origin: RecordOrigin::Experience {
                platform: "test".to_string(),
            },
        }
    }

    #[test]
    fn test_first_sighting_averages_with_half() {
        let mut world = WorldModel::new();
        let update = world.update(&[record(0, "trend", 0.7)]);
        let belief = world.belief("trend").unwrap();
        assert!((belief.confidence - 0.6).abs() < 1e-6);
        assert_eq!(belief.source_ids, vec![MemoryId(0)]);
        assert!((world.get_complexity() - 0.01).abs() < 1e-6);
        assert!((update.complexity_gap - 0.99).abs() < 1e-6);
        assert_eq!(update.gap_domain, GAP_DOMAIN);
    }

    #[test]
    fn test_confidence_converges_to_observed_importance() {
        let mut world = WorldModel::new();
        let x = 0.9f32;
        for n in 1..=12u64 {
            world.update(&[record(n, "insight", x)]);
            let expected = x + (INITIAL_CONFIDENCE - x) / 2f32.powi(n as i32);
            let confidence = world.belief("insight").unwrap().confidence;
            assert!((confidence - expected).abs() < 1e-6, "step {n}: {confidence} vs {expected}");
        }
        assert_eq!(world.belief("insight").unwrap().source_ids.len(), 12);
    }

    #[test]
    fn test_complexity_saturates() {
        let mut world = WorldModel::new();
        let records: Vec<MemoryRecord> = (0..150).map(|i| record(i, &format!("kind-{i}"), 0.5)).collect();
        let update = world.update(&records);
        assert_eq!(world.len(), 150);
        assert_eq!(world.get_complexity(), 1.0);
        assert_eq!(update.complexity_gap, 0.0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut world = WorldModel::new();
        world.update(&[record(0, "a", 0.4), record(1, "b", 0.8)]);
        let restored = WorldModel::from_snapshot(world.snapshot());
        assert_eq!(restored.len(), 2);
        assert!((restored.belief("b").unwrap().confidence - 0.65).abs() < 1e-6);
        assert!((restored.get_complexity() - 0.02).abs() < 1e-6);
    }
}
