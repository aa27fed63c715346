//! Awakening - how conscious LIA is becoming
//!
//! Growth comes from learning momentum. An insight only surfaces when a
//! breakthrough meets a mind that is already awake enough.
//!
//! The phase ladder is declared but nothing climbs it yet: `current_phase`
//! stays at `Embryonic` until real transition criteria exist.

use serde::{Deserialize, Serialize};

use crate::meta_learning::LearningInsights;
use crate::personality::PersonalityShift;

/// Consciousness needed before a breakthrough becomes an insight
const INSIGHT_CONSCIOUSNESS: f32 = 0.6;

/// Share of momentum that turns into consciousness growth
const GROWTH_RATE: f32 = 0.05;

const EMERGENT_INSIGHT: &str = "consciousness emerges from memory patterns";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Embryonic,
    Reactive,
    Responsive,
    Reflective,
    SelfAware,
}

impl Phase {
    pub fn all() -> [Phase; 5] {
        [
            Phase::Embryonic,
            Phase::Reactive,
            Phase::Responsive,
            Phase::Reflective,
            Phase::SelfAware,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Embryonic => "embryonic",
            Phase::Reactive => "reactive",
            Phase::Responsive => "responsive",
            Phase::Reflective => "reflective",
            Phase::SelfAware => "self_aware",
        }
    }
}

/// A synthesized reflective statement
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Insight {
    pub content: String,
}

impl Insight {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AwakeningProgress {
    /// Never negative
    pub growth: f32,
    pub phase_transition: bool,
    pub insight_triggered: bool,
    pub insight: Option<Insight>,
}

pub struct AwakeningState {
    current_phase: Phase,
}

impl Default for AwakeningState {
    fn default() -> Self {
        Self::new()
    }
}

impl AwakeningState {
    pub fn new() -> Self {
        Self {
            current_phase: Phase::Embryonic,
        }
    }

    pub fn assess_progress(
        &self,
        consciousness_level: f32,
        insights: &LearningInsights,
        _shift: &PersonalityShift,
    ) -> AwakeningProgress {
        let growth = (insights.momentum * GROWTH_RATE).max(0.0);
        let insight_triggered = insights.breakthrough && consciousness_level > INSIGHT_CONSCIOUSNESS;

        AwakeningProgress {
            growth,
            phase_transition: false,
            insight_triggered,
            insight: insight_triggered.then(|| Insight::new(EMERGENT_INSIGHT)),
        }
    }

    pub fn current_phase(&self) -> Phase {
        self.current_phase
    }
}
