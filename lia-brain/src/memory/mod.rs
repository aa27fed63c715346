//! Memory stream for LIA
//!
//! Salient experiences become records, records that feel alike get linked
//! into an associative graph, and the store forgets its least important
//! memories once it is full.
//!
//! ## Module Structure
//!
//! - `types` - MemoryRecord, Association, MemoryId
//! - `persistence` - MemorySnapshot (what survives a restart)

pub mod persistence;
pub mod types;

pub use persistence::MemorySnapshot;
pub use types::{Association, MemoryId, MemoryRecord, RecordOrigin};

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use lia_core::{clamp01, Experience, LiaConfig, LiaError, LiaResult};
use serde::{Deserialize, Serialize};

use crate::awakening::Insight;
use persistence::MEMORY_SNAPSHOT_VERSION;

/// Baseline used until LIA has a real predictive model
const BASELINE_PREDICTABILITY: f32 = 0.5;

/// Base term of the importance average
const BASE_IMPORTANCE: f32 = 0.5;

/// Importance given to every stored insight
const INSIGHT_IMPORTANCE: f32 = 0.9;

/// Emotional tone given to every stored insight
const INSIGHT_VALENCE: f32 = 0.8;

/// Concept key of reflective records
pub const REFLECTIVE_KIND: &str = "reflective_insight";

/// Lifetime counters of the memory stream
#[derive(Serialize, Deserialize, Default, Clone, Debug)]
pub struct MemoryStats {
    pub total_accepted: u64,
    pub total_discarded: u64,
    pub total_evicted: u64,
    pub total_insights: u64,
    pub total_associations: u64,
}

/// The associative memory store
///
/// Owns every record. Associations reference records by id only, so the
/// graph can hold cycles without any ownership between records.
pub struct MemoryStore {
    records: HashMap<MemoryId, MemoryRecord>,
    timeline: Vec<MemoryId>,
    next_id: u64,
    importance_threshold: f32,
    association_threshold: f32,
    max_memories: usize,
    stats: MemoryStats,
    /// Lowercased words of every record, kept in step with `records`
    word_sets: HashMap<MemoryId, HashSet<String>>,
}

impl MemoryStore {
    pub fn new(config: &LiaConfig) -> Self {
        Self {
            records: HashMap::new(),
            timeline: Vec::new(),
            next_id: 0,
            importance_threshold: config.importance_threshold,
            association_threshold: config.association_threshold,
            max_memories: config.max_memories.max(1),
            stats: MemoryStats::default(),
            word_sets: HashMap::new(),
        }
    }

    /// Rebuild a store from a snapshot, re-applying the current capacity
    pub fn from_snapshot(config: &LiaConfig, snapshot: MemorySnapshot) -> Self {
        let mut store = Self::new(config);
        store.stats = snapshot.stats;

        let mut highest = None;
        for record in snapshot.records {
            highest = highest.max(Some(record.id.0));
            store.word_sets.insert(record.id, word_set(&record.content));
            store.records.insert(record.id, record);
        }

        // Keep the stored order, drop dangling ids, append orphans
        let mut seen = HashSet::new();
        for id in snapshot.timeline {
            if store.records.contains_key(&id) && seen.insert(id) {
                store.timeline.push(id);
            }
        }
        let mut orphans: Vec<MemoryId> = store
            .records
            .keys()
            .filter(|id| !seen.contains(id))
            .copied()
            .collect();
        orphans.sort();
        store.timeline.extend(orphans);

        // Links to records that did not survive are meaningless
        let present: HashSet<MemoryId> = store.records.keys().copied().collect();
        for record in store.records.values_mut() {
            record.associations.retain(|a| present.contains(&a.target));
        }

        store.next_id = snapshot
            .next_id
            .max(highest.map(|h| h + 1).unwrap_or(0));
        store.enforce_capacity();

        tracing::info!(
            "Memory restored: {} records, next id {}",
            store.records.len(),
            store.next_id
        );
        store
    }

    /// Copy out everything needed to rebuild this store
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            version: MEMORY_SNAPSHOT_VERSION,
            next_id: self.next_id,
            records: self
                .timeline
                .iter()
                .filter_map(|id| self.records.get(id))
                .cloned()
                .collect(),
            timeline: self.timeline.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Turn salient experiences into records
    ///
    /// Returns copies of the records created by this batch. Capacity is
    /// enforced after every insertion, so the store never holds more than
    /// `max_memories + 1` records while linking.
    pub fn process_experiences(&mut self, experiences: &[Experience]) -> LiaResult<Vec<MemoryRecord>> {
        let mut created = Vec::new();
        let mut failure = None;
        let mut evicted = 0;

        for experience in experiences {
            let importance = self.importance(experience);
            if importance < self.importance_threshold {
                self.stats.total_discarded += 1;
                continue;
            }

            let now = Utc::now();
            let record = MemoryRecord {
                id: self.allocate_id(),
                content: experience.content.clone(),
                kind: experience.kind.clone(),
                timestamp: experience.timestamp,
                importance,
                emotional_valence: experience.valence(),
                associations: Vec::new(),
                retrieval_strength: 1.0,
                last_accessed: now,
                origin: RecordOrigin::Experience {
                    platform: experience.platform.clone(),
                },
            };

            let id = record.id;
            if let Err(e) = self.insert(record) {
                failure = Some(e);
                break;
            }
            self.stats.total_accepted += 1;
            self.create_associations(id, now);

            if let Some(record) = self.records.get(&id) {
                created.push(record.clone());
            }
            evicted += self.enforce_capacity();
        }

        if evicted > 0 {
            tracing::debug!("Forgot {} memories (capacity {})", evicted, self.max_memories);
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(created),
        }
    }

    /// Importance of an experience: average of base, novelty, emotion and surprise
    pub fn importance(&self, experience: &Experience) -> f32 {
        let novelty = experience.novelty();
        let emotional_intensity = experience.valence().abs();
        let surprise = 1.0 - self.predictability(experience);
        clamp01((BASE_IMPORTANCE + novelty + emotional_intensity + surprise) / 4.0)
    }

    /// How predictable an experience was
    ///
    /// There is no predictive model yet, so every experience is equally
    /// (un)surprising.
    fn predictability(&self, _experience: &Experience) -> f32 {
        BASELINE_PREDICTABILITY
    }

    /// Recall the memories most strongly linked to `id`
    ///
    /// Recalling strengthens the source record. Unknown ids yield nothing.
    pub fn retrieve_associated(&mut self, id: MemoryId, max_results: usize) -> Vec<MemoryRecord> {
        let mut links = match self.records.get_mut(&id) {
            Some(record) => {
                record.touch(Utc::now());
                record.associations.clone()
            }
            None => return Vec::new(),
        };

        links.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        links
            .iter()
            .filter_map(|link| self.records.get(&link.target))
            .take(max_results)
            .cloned()
            .collect()
    }

    /// Keep an insight LIA had about herself
    ///
    /// Insights skip the importance threshold and are not linked to other
    /// memories when stored.
    pub fn store_insight(&mut self, expression: &str, payload: Insight) -> LiaResult<MemoryId> {
        let now = Utc::now();
        let record = MemoryRecord {
            id: self.allocate_id(),
            content: expression.to_string(),
            kind: REFLECTIVE_KIND.to_string(),
            timestamp: now,
            importance: INSIGHT_IMPORTANCE,
            emotional_valence: INSIGHT_VALENCE,
            associations: Vec::new(),
            retrieval_strength: 1.0,
            last_accessed: now,
            origin: RecordOrigin::Insight { payload },
        };
        let id = record.id;
        self.insert(record)?;
        self.stats.total_insights += 1;
        self.enforce_capacity();
        Ok(id)
    }

    pub fn get(&self, id: MemoryId) -> Option<&MemoryRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_memories
    }

    pub fn stats(&self) -> &MemoryStats {
        &self.stats
    }

    /// Number of links in the graph (each symmetric pair counts once)
    pub fn association_count(&self) -> usize {
        self.records.values().map(|r| r.associations.len()).sum::<usize>() / 2
    }

    /// Most recent records first
    pub fn recent(&self, limit: usize) -> Vec<MemoryRecord> {
        self.timeline
            .iter()
            .rev()
            .filter_map(|id| self.records.get(id))
            .take(limit)
            .cloned()
            .collect()
    }

    fn allocate_id(&mut self) -> MemoryId {
        let id = MemoryId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, record: MemoryRecord) -> LiaResult<()> {
        if self.records.contains_key(&record.id) {
            return Err(LiaError::invariant(format!("duplicate memory id {}", record.id)));
        }
        self.timeline.push(record.id);
        self.word_sets.insert(record.id, word_set(&record.content));
        self.records.insert(record.id, record);
        Ok(())
    }

    /// Link a freshly inserted record to every record it resembles
    ///
    /// Scans the whole store, which stays tractable because eviction caps
    /// its size.
    fn create_associations(&mut self, new_id: MemoryId, now: DateTime<Utc>) {
        let (Some(new_record), Some(new_words)) = (self.records.get(&new_id), self.word_sets.get(&new_id)) else {
            return;
        };

        let links: Vec<(MemoryId, f32)> = self
            .timeline
            .iter()
            .filter(|id| **id != new_id)
            .filter_map(|id| Some((self.records.get(id)?, self.word_sets.get(id)?)))
            .filter_map(|(other, other_words)| {
                let strength = association_strength(new_record, new_words, other, other_words);
                (strength > self.association_threshold).then_some((other.id, strength))
            })
            .collect();

        for (other_id, strength) in &links {
            if let Some(other) = self.records.get_mut(other_id) {
                other.link(new_id, *strength, now);
            }
        }
        if let Some(record) = self.records.get_mut(&new_id) {
            for (other_id, strength) in &links {
                record.link(*other_id, *strength, now);
            }
        }
        self.stats.total_associations += links.len() as u64;
    }

    /// Forget the least important, least recently used records until the
    /// store fits its capacity. Returns how many were removed.
    fn enforce_capacity(&mut self) -> usize {
        if self.records.len() <= self.max_memories {
            return 0;
        }
        let excess = self.records.len() - self.max_memories;

        let mut candidates: Vec<(f32, DateTime<Utc>, MemoryId)> = self
            .records
            .values()
            .map(|r| (r.importance, r.last_accessed, r.id))
            .collect();
        candidates.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.cmp(&b.2))
        });

        let evicted: HashSet<MemoryId> = candidates
            .into_iter()
            .take(excess)
            .map(|(_, _, id)| id)
            .collect();

        for id in &evicted {
            self.records.remove(id);
            self.word_sets.remove(id);
        }
        self.timeline.retain(|id| !evicted.contains(id));
        for record in self.records.values_mut() {
            record.associations.retain(|a| !evicted.contains(&a.target));
        }

        self.stats.total_evicted += evicted.len() as u64;
        evicted.len()
    }
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// Jaccard overlap of two word sets; 0 when either is empty
fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

/// Average of word overlap, closeness in time (hour scale) and emotional
/// similarity, clamped to [0, 1]
fn association_strength(
    a: &MemoryRecord,
    a_words: &HashSet<String>,
    b: &MemoryRecord,
    b_words: &HashSet<String>,
) -> f32 {
    let semantic = jaccard(a_words, b_words);
    let seconds_apart = (a.timestamp - b.timestamp).num_milliseconds().abs() as f32 / 1000.0;
    let temporal = 1.0 / (1.0 + seconds_apart / 3600.0);
    let emotional = 1.0 - (a.emotional_valence - b.emotional_valence).abs();
    clamp01((semantic + temporal + emotional) / 3.0)
}
