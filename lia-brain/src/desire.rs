//! Desires - what LIA wants right now
//!
//! Desires are born from curiosity, from gaps in the world model and from
//! surplus energy. They fade a little every cycle and vanish once they are
//! too weak to matter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::being::InternalState;
use crate::world_model::WorldUpdate;

/// Desires at or below this intensity are forgotten
const PRUNE_INTENSITY: f32 = 0.1;

/// Urgency every desire is born with
const DEFAULT_URGENCY: f32 = 0.5;

const CURIOSITY_TRIGGER: f32 = 0.6;
const COMPLEXITY_GAP_TRIGGER: f32 = 0.7;
const ENERGY_TRIGGER: f32 = 0.8;

/// Medium creative desires aim at
pub const CREATIVE_MEDIUM: &str = "synthetic_expression";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DesireKind {
    /// Curiosity wants more input
    KnowledgeSeeking,
    /// The world model has a gap to fill
    UnderstandingSeeking,
    /// Surplus energy wants an outlet
    CreativeExpression,
}

impl DesireKind {
    pub fn name(&self) -> &'static str {
        match self {
            DesireKind::KnowledgeSeeking => "knowledge_seeking",
            DesireKind::UnderstandingSeeking => "understanding_seeking",
            DesireKind::CreativeExpression => "creative_expression",
        }
    }
}

/// What a desire is about
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DesireTarget {
    Domain(String),
    GapType(String),
    Medium(String),
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Desire {
    pub kind: DesireKind,
    /// 0.0 to 1.0
    pub intensity: f32,
    pub target: DesireTarget,
    pub created_at: DateTime<Utc>,
    pub last_satisfied: Option<DateTime<Utc>>,
    pub urgency: f32,
}

impl Desire {
    pub fn new(kind: DesireKind, intensity: f32, target: DesireTarget) -> Self {
        Self {
            kind,
            intensity: lia_core::clamp01(intensity),
            target,
            created_at: Utc::now(),
            last_satisfied: None,
            urgency: DEFAULT_URGENCY,
        }
    }

    fn decay(&mut self, rate: f32) {
        self.intensity = lia_core::clamp01(self.intensity * (1.0 - rate).max(0.0));
    }
}

pub struct DesireState {
    active: Vec<Desire>,
    decay_rate: f32,
}

impl DesireState {
    pub fn new(decay_rate: f32) -> Self {
        Self {
            active: Vec::new(),
            decay_rate: lia_core::clamp01(decay_rate),
        }
    }

    /// Decay what exists, then let the current state spawn new desires
    ///
    /// Triggers read the inputs as given, never the decayed values, and
    /// may add a desire of a kind that is already active.
    pub fn generate_desires(&mut self, state: &InternalState, world: &WorldUpdate) -> Vec<Desire> {
        for desire in &mut self.active {
            desire.decay(self.decay_rate);
        }
        let before = self.active.len();
        self.active.retain(|d| d.intensity > PRUNE_INTENSITY);
        let faded = before - self.active.len();
        if faded > 0 {
            tracing::debug!("{} desires faded away", faded);
        }

        if state.curiosity > CURIOSITY_TRIGGER {
            self.active.push(Desire::new(
                DesireKind::KnowledgeSeeking,
                state.curiosity * 0.8,
                DesireTarget::Domain(state.attention_focus.clone()),
            ));
        }

        if world.complexity_gap > COMPLEXITY_GAP_TRIGGER {
            self.active.push(Desire::new(
                DesireKind::UnderstandingSeeking,
                world.complexity_gap,
                DesireTarget::GapType(world.gap_domain.clone()),
            ));
        }

        if state.energy_level > ENERGY_TRIGGER {
            self.active.push(Desire::new(
                DesireKind::CreativeExpression,
                state.energy_level * 0.6,
                DesireTarget::Medium(CREATIVE_MEDIUM.to_string()),
            ));
        }

        self.active.clone()
    }

    /// Calm every desire of `kind` by `satisfaction_level` (0.0 to 1.0)
    pub fn satisfy_desire(&mut self, kind: DesireKind, satisfaction_level: f32) {
        let keep = 1.0 - lia_core::clamp01(satisfaction_level);
        let now = Utc::now();
        for desire in self.active.iter_mut().filter(|d| d.kind == kind) {
            desire.intensity = lia_core::clamp01(desire.intensity * keep);
            desire.last_satisfied = Some(now);
        }
    }

    pub fn active(&self) -> &[Desire] {
        &self.active
    }

    pub fn total_intensity(&self) -> f32 {
        self.active.iter().map(|d| d.intensity).sum()
    }

    pub fn average_intensity(&self) -> f32 {
        if self.active.is_empty() {
            0.0
        } else {
            self.total_intensity() / self.active.len() as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(curiosity: f32, energy_level: f32) -> InternalState {
        InternalState {
            curiosity,
            energy_level,
            ..InternalState::default()
        }
    }

    fn world(gap: f32) -> WorldUpdate {
        WorldUpdate {
            complexity_gap: gap,
            gap_domain: "emerging_patterns".to_string(),
        }
    }

    #[test]
    fn test_curiosity_and_energy_spawn_two_desires() {
        let mut desires = DesireState::new(0.05);
        let active = desires.generate_desires(&state(0.7, 0.9), &world(0.2));
        assert_eq!(active.len(), 2);

        assert_eq!(active[0].kind, DesireKind::KnowledgeSeeking);
        assert!((active[0].intensity - 0.56).abs() < 1e-6);
        assert_eq!(active[0].target, DesireTarget::Domain("emerging_patterns".to_string()));

        assert_eq!(active[1].kind, DesireKind::CreativeExpression);
        assert!((active[1].intensity - 0.54).abs() < 1e-6);
        assert!(active.iter().all(|d| d.kind != DesireKind::UnderstandingSeeking));
        assert!(active.iter().all(|d| (d.urgency - 0.5).abs() < f32::EPSILON));
    }

    #[test]
    fn test_all_triggers_fire_together() {
        let mut desires = DesireState::new(0.05);
        let active = desires.generate_desires(&state(0.9, 0.95), &world(0.99));
        assert_eq!(active.len(), 3);
        assert_eq!(active[1].kind, DesireKind::UnderstandingSeeking);
        assert!((active[1].intensity - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut desires = DesireState::new(0.05);
        desires.generate_desires(&state(0.7, 0.5), &world(0.0));
        let active = desires.generate_desires(&state(0.7, 0.5), &world(0.0));
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|d| d.kind == DesireKind::KnowledgeSeeking));
        assert!(active[0].intensity < active[1].intensity);
    }

    #[test]
    fn test_decay_strictly_decreases_until_pruned() {
        let mut desires = DesireState::new(0.05);
        desires.generate_desires(&state(1.0, 1.0), &world(1.0));
        let quiet = (state(0.5, 0.5), world(0.5));

        let mut previous = desires.total_intensity();
        let mut rounds = 0;
        while !desires.active().is_empty() {
            desires.generate_desires(&quiet.0, &quiet.1);
            let total = desires.total_intensity();
            assert!(total < previous, "round {rounds}: {total} >= {previous}");
            previous = total;
            rounds += 1;
            assert!(rounds < 200, "desires never faded");
        }
        assert!(desires.active().iter().all(|d| d.intensity > 0.1));
    }

    #[test]
    fn test_satisfy_only_touches_matching_kind() {
        let mut desires = DesireState::new(0.05);
        desires.generate_desires(&state(0.7, 0.9), &world(0.2));
        desires.satisfy_desire(DesireKind::CreativeExpression, 0.5);

        let active = desires.active();
        assert!((active[0].intensity - 0.56).abs() < 1e-6);
        assert!(active[0].last_satisfied.is_none());
        assert!((active[1].intensity - 0.27).abs() < 1e-6);
        assert!(active[1].last_satisfied.is_some());

        // No matching desire: nothing happens
        desires.satisfy_desire(DesireKind::UnderstandingSeeking, 1.0);
        assert_eq!(desires.active().len(), 2);
    }
}
