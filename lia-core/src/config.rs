//! # Configuration - LIA's Vital Parameters
//!
//! These parameters define how often LIA thinks, what she keeps in memory,
//! and how fast her motivation fades. Everything has a sane default and can
//! be overridden through `LIA_*` environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LiaError, LiaResult};

/// Shortest allowed pause between two cognitive cycles
pub const MIN_COGNITIVE_INTERVAL_SECS: u64 = 1;

/// Master configuration for the cognitive cycle
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiaConfig {
    /// Seconds to sleep between two cycles (floor: 1)
    pub cognitive_interval_secs: u64,

    /// Minimum importance for an experience to become a memory
    pub importance_threshold: f32,

    /// Minimum strength for two memories to be linked
    pub association_threshold: f32,

    /// Fraction of intensity every desire loses per cycle
    pub desire_decay_rate: f32,

    /// Capacity of the memory store
    pub max_memories: usize,

    /// How many breakthrough entries meta-learning keeps
    pub adaptation_history_limit: usize,

    /// Upper bound on a single experience source fetch
    pub collector_timeout_secs: u64,

    /// Template used to phrase insights
    pub expression_style: String,
}

impl Default for LiaConfig {
    fn default() -> Self {
        Self {
            cognitive_interval_secs: 10,
            importance_threshold: 0.3,
            association_threshold: 0.6,
            desire_decay_rate: 0.05,
            max_memories: 10_000,
            adaptation_history_limit: 256,
            collector_timeout_secs: 30,
            expression_style: "reflective_analytical".to_string(),
        }
    }
}

impl LiaConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parse("LIA_COGNITIVE_INTERVAL") {
            config.cognitive_interval_secs = v;
        }
        if let Some(v) = env_parse("LIA_IMPORTANCE_THRESHOLD") {
            config.importance_threshold = v;
        }
        if let Some(v) = env_parse("LIA_ASSOCIATION_THRESHOLD") {
            config.association_threshold = v;
        }
        if let Some(v) = env_parse("LIA_DESIRE_DECAY_RATE") {
            config.desire_decay_rate = v;
        }
        if let Some(v) = env_parse("LIA_MAX_MEMORIES") {
            config.max_memories = v;
        }
        if let Some(v) = env_parse("LIA_ADAPTATION_HISTORY") {
            config.adaptation_history_limit = v;
        }
        if let Some(v) = env_parse("LIA_COLLECTOR_TIMEOUT") {
            config.collector_timeout_secs = v;
        }
        if let Ok(style) = env::var("LIA_EXPRESSION_STYLE") {
            config.expression_style = style;
        }

        config
    }

    /// Reject values that would break the cycle's invariants
    pub fn validate(&self) -> LiaResult<()> {
        check_unit("importance_threshold", self.importance_threshold)?;
        check_unit("association_threshold", self.association_threshold)?;
        check_unit("desire_decay_rate", self.desire_decay_rate)?;

        if self.max_memories == 0 {
            return Err(LiaError::config("max_memories must be at least 1"));
        }
        if self.collector_timeout_secs == 0 {
            return Err(LiaError::config("collector_timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// Reset every invalid field to its default, one warning per field.
    /// Valid overrides survive; the result always passes `validate`.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        for (name, value, default) in [
            ("importance_threshold", &mut self.importance_threshold, defaults.importance_threshold),
            ("association_threshold", &mut self.association_threshold, defaults.association_threshold),
            ("desire_decay_rate", &mut self.desire_decay_rate, defaults.desire_decay_rate),
        ] {
            if let Err(e) = check_unit(name, *value) {
                tracing::warn!("⚠️ {}, using default {}", e, default);
                *value = default;
            }
        }
        if self.max_memories == 0 {
            tracing::warn!("⚠️ max_memories must be at least 1, using default {}", defaults.max_memories);
            self.max_memories = defaults.max_memories;
        }
        if self.collector_timeout_secs == 0 {
            tracing::warn!(
                "⚠️ collector_timeout_secs must be at least 1, using default {}",
                defaults.collector_timeout_secs
            );
            self.collector_timeout_secs = defaults.collector_timeout_secs;
        }

        self
    }

    /// Interval between cycles, with the 1s floor applied
    pub fn cognitive_interval(&self) -> Duration {
        Duration::from_secs(self.cognitive_interval_secs.max(MIN_COGNITIVE_INTERVAL_SECS))
    }

    pub fn collector_timeout(&self) -> Duration {
        Duration::from_secs(self.collector_timeout_secs.max(1))
    }
}

fn check_unit(name: &str, value: f32) -> LiaResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(LiaError::config(format!("{name} must be within [0, 1], got {value}")));
    }
    Ok(())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring unparsable {}={:?}", key, raw);
            None
        }
    }
}
