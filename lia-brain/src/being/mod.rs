//! The Digital Being - LIA's mind and the loop that keeps it thinking
//!
//! `Mind` owns every cognitive component and runs one cycle at a time.
//! `CycleScheduler` drives it on a fixed interval.
//!
//! ## One cycle
//!
//! ```text
//! experiences → memory → world model → desires → personality
//!             → meta-learning → awakening → fold into internal state
//!             → (maybe) insight
//! ```

pub mod cancel;
pub mod scheduler;
pub mod state;

pub use cancel::CancelToken;
pub use scheduler::CycleScheduler;
pub use state::{CycleCounters, InternalState, StatusSnapshot};

use lia_core::{clamp01, Experience, LiaConfig, LiaResult};
use serde::Serialize;

use crate::awakening::AwakeningState;
use crate::desire::{DesireKind, DesireState};
use crate::memory::{MemoryId, MemoryRecord, MemorySnapshot, MemoryStore};
use crate::meta_learning::{LearningInsights, MetaLearningState};
use crate::personality::{ExpressionStyle, PersonalityState};
use crate::world_model::{Belief, WorldModel, WorldSnapshot};

/// Curiosity gained from a breakthrough
const BREAKTHROUGH_CURIOSITY: f32 = 0.05;

/// What a completed cycle did
#[derive(Serialize, Clone, Debug, Default)]
pub struct CycleReport {
    pub experiences: usize,
    pub new_memories: usize,
    pub active_desires: usize,
    pub growth: f32,
    pub breakthrough: bool,
    /// Phrased insight, if one surfaced
    pub insight: Option<String>,
    pub insight_id: Option<MemoryId>,
}

#[derive(Debug)]
pub enum CycleOutcome {
    Completed(CycleReport),
    /// Stopped at a step boundary; every component is left consistent
    Cancelled,
}

/// Everything LIA is, in one owned bundle
pub struct Mind {
    memory: MemoryStore,
    world: WorldModel,
    desires: DesireState,
    personality: PersonalityState,
    meta: MetaLearningState,
    awakening: AwakeningState,
    internal_state: InternalState,
    consciousness_level: f32,
}

impl Mind {
    pub fn new(config: &LiaConfig) -> Self {
        Self::with_parts(config, MemoryStore::new(config), WorldModel::new())
    }

    /// Wake up with whatever survived the last shutdown
    pub fn restore(
        config: &LiaConfig,
        memory: Option<MemorySnapshot>,
        world: Option<WorldSnapshot>,
    ) -> Self {
        let memory = match memory {
            Some(snapshot) => MemoryStore::from_snapshot(config, snapshot),
            None => MemoryStore::new(config),
        };
        let world = world.map(WorldModel::from_snapshot).unwrap_or_default();
        Self::with_parts(config, memory, world)
    }

    fn with_parts(config: &LiaConfig, memory: MemoryStore, world: WorldModel) -> Self {
        Self {
            memory,
            world,
            desires: DesireState::new(config.desire_decay_rate),
            personality: PersonalityState::new(ExpressionStyle::parse(&config.expression_style)),
            meta: MetaLearningState::new(config.max_memories, config.adaptation_history_limit),
            awakening: AwakeningState::new(),
            internal_state: InternalState::default(),
            consciousness_level: 0.0,
        }
    }

    /// Run every step of one cognitive cycle on an already gathered batch
    pub fn run_cycle(&mut self, experiences: &[Experience], cancel: &CancelToken) -> LiaResult<CycleOutcome> {
        if cancel.is_cancelled() {
            return Ok(CycleOutcome::Cancelled);
        }
        let records = self.memory.process_experiences(experiences)?;

        if cancel.is_cancelled() {
            return Ok(CycleOutcome::Cancelled);
        }
        let world_update = self.world.update(&records);

        if cancel.is_cancelled() {
            return Ok(CycleOutcome::Cancelled);
        }
        let desires = self.desires.generate_desires(&self.internal_state, &world_update);

        if cancel.is_cancelled() {
            return Ok(CycleOutcome::Cancelled);
        }
        let shift = self.personality.adapt(&records, &desires);

        if cancel.is_cancelled() {
            return Ok(CycleOutcome::Cancelled);
        }
        let insights = self.meta.process_cycle(experiences, &records, &desires);

        if cancel.is_cancelled() {
            return Ok(CycleOutcome::Cancelled);
        }
        let progress = self
            .awakening
            .assess_progress(self.consciousness_level, &insights, &shift);

        if cancel.is_cancelled() {
            return Ok(CycleOutcome::Cancelled);
        }
        self.fold(progress.growth, &insights);

        let mut report = CycleReport {
            experiences: experiences.len(),
            new_memories: records.len(),
            active_desires: desires.len(),
            growth: progress.growth,
            breakthrough: insights.breakthrough,
            insight: None,
            insight_id: None,
        };

        if let Some(insight) = progress.insight.filter(|_| progress.insight_triggered) {
            let expression = self.personality.express_insight(&insight);
            tracing::info!("🧠 INSIGHT: {}", expression);
            report.insight_id = Some(self.memory.store_insight(&expression, insight)?);
            report.insight = Some(expression);
        }

        Ok(CycleOutcome::Completed(report))
    }

    /// Fold the cycle's results back into the internal state
    fn fold(&mut self, growth: f32, insights: &LearningInsights) {
        self.consciousness_level = clamp01(self.consciousness_level + growth.max(0.0));

        let avg_intensity = self.desires.average_intensity();
        let state = &mut self.internal_state;
        state.learning_momentum = insights.momentum;
        state.energy_level = (0.3 + avg_intensity * 0.5).clamp(0.1, 1.0);

        if insights.breakthrough {
            state.curiosity = (state.curiosity + BREAKTHROUGH_CURIOSITY).min(1.0);
        }
        if let Some(focus) = &insights.recommended_focus {
            state.attention_focus = focus.clone();
        }
    }

    /// Pure read; the caller supplies what only the scheduler knows
    pub fn status(&self, awake: bool, uptime_seconds: f64, cycles: CycleCounters) -> StatusSnapshot {
        StatusSnapshot {
            awake,
            consciousness_level: (self.consciousness_level * 10_000.0).round() / 10_000.0,
            internal_state: self.internal_state.clone(),
            personality_traits: self.personality.traits().clone(),
            expression_style: self.personality.style(),
            active_desires: self.desires.active().to_vec(),
            world_model_complexity: self.world.get_complexity(),
            uptime_seconds,
            current_phase: self.awakening.current_phase(),
            memory_count: self.memory.len(),
            memory_capacity: self.memory.capacity(),
            memory_stats: self.memory.stats().clone(),
            association_count: self.memory.association_count(),
            belief_count: self.world.len(),
            breakthroughs: self.meta.total_breakthroughs(),
            adaptations: self.meta.adaptation_history().count(),
            cycles,
        }
    }

    /// Recall memories linked to `id` (strengthens the source record)
    pub fn recall(&mut self, id: MemoryId, max_results: usize) -> Vec<MemoryRecord> {
        self.memory.retrieve_associated(id, max_results)
    }

    pub fn satisfy_desire(&mut self, kind: DesireKind, satisfaction_level: f32) {
        self.desires.satisfy_desire(kind, satisfaction_level);
    }

    pub fn recent_memories(&self, limit: usize) -> Vec<MemoryRecord> {
        self.memory.recent(limit)
    }

    pub fn beliefs(&self) -> Vec<(String, Belief)> {
        self.world.snapshot().beliefs
    }

    pub fn belief(&self, concept: &str) -> Option<Belief> {
        self.world.belief(concept).cloned()
    }

    pub fn memory_snapshot(&self) -> MemorySnapshot {
        self.memory.snapshot()
    }

    pub fn world_snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }

    pub fn consciousness_level(&self) -> f32 {
        self.consciousness_level
    }

    pub fn internal_state(&self) -> &InternalState {
        &self.internal_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awakening::Phase;
    use tokio::sync::watch;

    fn experience(content: &str, novelty: f32, valence: f32) -> Experience {
        Experience::new("test", "trend", content)
            .with_novelty(novelty)
            .with_valence(valence)
    }

    fn completed(outcome: CycleOutcome) -> CycleReport {
        match outcome {
            CycleOutcome::Completed(report) => report,
            CycleOutcome::Cancelled => panic!("cycle was cancelled"),
        }
    }

    #[test]
    fn test_cycle_creates_memory_and_belief() {
        let mut mind = Mind::new(&LiaConfig::default());
        let report = completed(
            mind.run_cycle(&[experience("A", 0.9, 0.9)], &CancelToken::never())
                .unwrap(),
        );
        assert_eq!(report.new_memories, 1);
        assert!(report.breakthrough);
        assert!(report.insight.is_none());

        let status = mind.status(true, 0.0, CycleCounters::default());
        assert_eq!(status.memory_count, 1);
        assert_eq!(status.belief_count, 1);
        assert_eq!(status.current_phase, Phase::Embryonic);
        assert_eq!(status.breakthroughs, 1);
        assert_eq!(status.adaptations, 1);
        assert_eq!(status.memory_capacity, 10_000);
        assert_eq!(status.memory_stats.total_accepted, 1);
        assert!(mind.belief("trend").is_some());
        // Breakthrough raised curiosity and set the focus
        assert!((status.internal_state.curiosity - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_fold_energy_from_desires() {
        let mut mind = Mind::new(&LiaConfig::default());
        // Default state: curiosity 0.7 fires knowledge_seeking (0.56);
        // energy 0.8 is not above the creative trigger. Gap 1.0 fires
        // understanding_seeking (1.0).
        completed(mind.run_cycle(&[], &CancelToken::never()).unwrap());
        let expected = 0.3 + ((0.56 + 1.0) / 2.0) * 0.5;
        assert!((mind.internal_state().energy_level - expected).abs() < 1e-6);
        assert_eq!(mind.internal_state().learning_momentum, 0.0);
    }

    #[test]
    fn test_consciousness_never_decreases() {
        let config = LiaConfig {
            max_memories: 4,
            ..LiaConfig::default()
        };
        let mut mind = Mind::new(&config);
        let mut previous = mind.consciousness_level();
        for i in 0..40 {
            let batch = vec![experience(&format!("event {i}"), 0.7, 0.4)];
            completed(mind.run_cycle(&batch, &CancelToken::never()).unwrap());
            assert!(mind.consciousness_level() >= previous);
            assert!(mind.consciousness_level() <= 1.0);
            previous = mind.consciousness_level();
        }
        assert!(previous > 0.0);
    }

    #[test]
    fn test_insight_is_stored_when_awake_enough() {
        let mut mind = Mind::new(&LiaConfig::default());
        mind.consciousness_level = 0.65;

        let report = completed(
            mind.run_cycle(&[experience("a stunning discovery", 0.95, 0.6)], &CancelToken::never())
                .unwrap(),
        );
        assert_eq!(
            report.insight.as_deref(),
            Some("I perceive that consciousness emerges from memory patterns")
        );
        let id = report.insight_id.unwrap();
        let recent = mind.recent_memories(1);
        assert_eq!(recent[0].id, id);
        assert!(recent[0].is_reflective());
        assert_eq!(mind.memory.len(), 2);
    }

    #[test]
    fn test_no_insight_below_threshold() {
        let mut mind = Mind::new(&LiaConfig::default());
        mind.consciousness_level = 0.5;
        let report = completed(
            mind.run_cycle(&[experience("a stunning discovery", 0.95, 0.6)], &CancelToken::never())
                .unwrap(),
        );
        assert!(report.breakthrough);
        assert!(report.insight.is_none());
    }

    #[test]
    fn test_cancelled_cycle_leaves_state_untouched() {
        let (tx, rx) = watch::channel(false);
        let token = CancelToken::new(rx);
        tx.send_replace(true);

        let mut mind = Mind::new(&LiaConfig::default());
        let outcome = mind.run_cycle(&[experience("A", 0.9, 0.9)], &token).unwrap();
        assert!(matches!(outcome, CycleOutcome::Cancelled));
        assert_eq!(mind.memory.len(), 0);
        assert!(mind.desires.active().is_empty());
    }

    #[test]
    fn test_status_is_a_pure_read() {
        let mut mind = Mind::new(&LiaConfig::default());
        completed(mind.run_cycle(&[experience("A", 0.9, 0.9)], &CancelToken::never()).unwrap());
        let first = mind.status(true, 1.0, CycleCounters::default());
        let second = mind.status(true, 1.0, CycleCounters::default());
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
