//! # Experience - One Observed Event
//!
//! Experiences are how the outside world reaches LIA. Collectors produce
//! them, the memory stream scores them, and they are never mutated after
//! creation.
//!
//! ## JSON form
//!
//! ```json
//! { "platform": "reddit", "type": "discussion", "content": "...",
//!   "emotional_valence": 0.4, "novelty": 0.8 }
//! ```
//!
//! `type` is accepted as an alias of `kind`, a missing timestamp means
//! "now", and missing scores fall back to a neutral valence and medium
//! novelty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An externally observed event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// Where it came from (twitter, reddit, inbox...)
    pub platform: String,
    /// Category of the event; becomes the world-model concept
    #[serde(alias = "type")]
    pub kind: String,
    /// Raw text content
    pub content: String,
    /// Emotional tone (-1.0 = negative, 1.0 = positive)
    #[serde(default)]
    pub emotional_valence: f32,
    /// How new this feels (0.0 = seen it all, 1.0 = never seen)
    #[serde(default = "default_novelty")]
    pub novelty: f32,
    /// When it was observed
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

fn default_novelty() -> f32 {
    0.5
}

impl Experience {
    /// Create a neutral experience observed now
    pub fn new(platform: impl Into<String>, kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            kind: kind.into(),
            content: content.into(),
            emotional_valence: 0.0,
            novelty: default_novelty(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_valence(mut self, valence: f32) -> Self {
        self.emotional_valence = valence;
        self
    }

    pub fn with_novelty(mut self, novelty: f32) -> Self {
        self.novelty = novelty;
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Valence clamped to [-1, 1]; non-finite values read as neutral
    pub fn valence(&self) -> f32 {
        if self.emotional_valence.is_finite() {
            self.emotional_valence.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    /// Novelty clamped to [0, 1]; non-finite values read as zero
    pub fn novelty(&self) -> f32 {
        if self.novelty.is_finite() {
            self.novelty.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
