//! Internal state and the status snapshot handed to observers

use serde::{Deserialize, Serialize};

use crate::awakening::Phase;
use crate::desire::Desire;
use crate::memory::MemoryStats;
use crate::personality::{ExpressionStyle, PersonalityTraits};

/// LIA's running mood, folded back after every cycle
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InternalState {
    /// 0.0 to 1.0; above 0.6 LIA wants knowledge
    pub curiosity: f32,
    /// Domain curiosity points at
    pub attention_focus: String,
    pub emotional_tone: String,
    /// 0.1 to 1.0; above 0.8 LIA wants to create
    pub energy_level: f32,
    /// Momentum reported by the last cycle
    pub learning_momentum: f32,
}

impl Default for InternalState {
    fn default() -> Self {
        Self {
            curiosity: 0.7,
            attention_focus: "emerging_patterns".to_string(),
            emotional_tone: "neutral".to_string(),
            energy_level: 0.8,
            learning_momentum: 0.0,
        }
    }
}

/// Lifetime counters of the cognitive loop
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleCounters {
    pub started: u64,
    pub completed: u64,
    pub failed: u64,
    pub cancelled: u64,
    pub insights: u64,
}

/// Read-only copy of everything an observer may want to see
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StatusSnapshot {
    pub awake: bool,
    /// Rounded to 4 decimals
    pub consciousness_level: f32,
    pub internal_state: InternalState,
    pub personality_traits: PersonalityTraits,
    pub expression_style: ExpressionStyle,
    pub active_desires: Vec<Desire>,
    pub world_model_complexity: f32,
    pub uptime_seconds: f64,
    pub current_phase: Phase,
    pub memory_count: usize,
    pub memory_capacity: usize,
    pub memory_stats: MemoryStats,
    pub association_count: usize,
    pub belief_count: usize,
    /// Breakthroughs seen since startup
    pub breakthroughs: u64,
    /// Breakthroughs still held in the adaptation history
    pub adaptations: usize,
    pub cycles: CycleCounters,
}
