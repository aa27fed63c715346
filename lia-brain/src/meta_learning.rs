//! Meta-Learning for LIA
//!
//! Watches the flow of a whole cycle rather than any single memory: how
//! much was retained, how well experiences fed the active desires, and
//! whether something genuinely new showed up.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use lia_core::Experience;
use serde::{Deserialize, Serialize};

use crate::desire::Desire;
use crate::memory::MemoryRecord;

/// Novelty above which a cycle counts as a breakthrough
const BREAKTHROUGH_NOVELTY: f32 = 0.85;

/// Focus recommended after a breakthrough
pub const BREAKTHROUGH_FOCUS: &str = "emerging_patterns";

/// What one cycle taught LIA about her own learning
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LearningInsights {
    /// Share of capacity filled by this cycle (0.0 to 1.0)
    pub momentum: f32,
    /// Experiences per active desire, capped at 1.0
    pub efficiency: f32,
    pub breakthrough: bool,
    pub recommended_focus: Option<String>,
}

/// One remembered breakthrough
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Adaptation {
    pub recorded_at: DateTime<Utc>,
    pub insights: LearningInsights,
}

pub struct MetaLearningState {
    max_memories: usize,
    history_limit: usize,
    adaptation_history: VecDeque<Adaptation>,
    total_breakthroughs: u64,
}

impl MetaLearningState {
    pub fn new(max_memories: usize, history_limit: usize) -> Self {
        Self {
            max_memories: max_memories.max(1),
            history_limit,
            adaptation_history: VecDeque::new(),
            total_breakthroughs: 0,
        }
    }

    pub fn process_cycle(
        &mut self,
        experiences: &[Experience],
        records: &[MemoryRecord],
        desires: &[Desire],
    ) -> LearningInsights {
        let momentum = (records.len() as f32 / self.max_memories as f32).min(1.0);
        let efficiency = (experiences.len() as f32 / desires.len().max(1) as f32).min(1.0);
        let breakthrough = !experiences.is_empty()
            && experiences.iter().any(|e| e.novelty() > BREAKTHROUGH_NOVELTY);

        let insights = LearningInsights {
            momentum,
            efficiency,
            breakthrough,
            recommended_focus: breakthrough.then(|| BREAKTHROUGH_FOCUS.to_string()),
        };

        if breakthrough {
            self.total_breakthroughs += 1;
            tracing::info!(
                "💡 Breakthrough #{} (momentum {:.4}, efficiency {:.2})",
                self.total_breakthroughs,
                momentum,
                efficiency
            );
            self.remember(insights.clone());
        }

        insights
    }

    /// Ring buffer: the oldest entry goes first
    fn remember(&mut self, insights: LearningInsights) {
        if self.history_limit == 0 {
            return;
        }
        while self.adaptation_history.len() >= self.history_limit {
            self.adaptation_history.pop_front();
        }
        self.adaptation_history.push_back(Adaptation {
            recorded_at: Utc::now(),
            insights,
        });
    }

    pub fn adaptation_history(&self) -> impl Iterator<Item = &Adaptation> {
        self.adaptation_history.iter()
    }

    pub fn total_breakthroughs(&self) -> u64 {
        self.total_breakthroughs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desire::{DesireKind, DesireTarget};

    fn novel(novelty: f32) -> Experience {
        Experience::new("test", "trend", "something").with_novelty(novelty)
    }

    fn desire() -> Desire {
        Desire::new(DesireKind::KnowledgeSeeking, 0.5, DesireTarget::Domain("x".into()))
    }

    #[test]
    fn test_quiet_cycle() {
        let mut meta = MetaLearningState::new(10_000, 8);
        let insights = meta.process_cycle(&[], &[], &[]);
        assert_eq!(insights.momentum, 0.0);
        assert_eq!(insights.efficiency, 0.0);
        assert!(!insights.breakthrough);
        assert!(insights.recommended_focus.is_none());
        assert_eq!(meta.adaptation_history().count(), 0);
    }

    #[test]
    fn test_efficiency_is_capped() {
        let mut meta = MetaLearningState::new(10_000, 8);
        let experiences = vec![novel(0.5), novel(0.5), novel(0.5)];
        let insights = meta.process_cycle(&experiences, &[], &[desire(), desire()]);
        assert_eq!(insights.efficiency, 1.0);

        let insights = meta.process_cycle(&experiences[..1], &[], &[desire(), desire()]);
        assert!((insights.efficiency - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_breakthrough_needs_high_novelty() {
        let mut meta = MetaLearningState::new(10_000, 8);
        assert!(!meta.process_cycle(&[novel(0.85)], &[], &[]).breakthrough);

        let insights = meta.process_cycle(&[novel(0.2), novel(0.9)], &[], &[]);
        assert!(insights.breakthrough);
        assert_eq!(insights.recommended_focus.as_deref(), Some(BREAKTHROUGH_FOCUS));
        assert_eq!(meta.total_breakthroughs(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut meta = MetaLearningState::new(10_000, 3);
        for _ in 0..10 {
            meta.process_cycle(&[novel(0.95)], &[], &[]);
        }
        assert_eq!(meta.adaptation_history().count(), 3);
        assert_eq!(meta.total_breakthroughs(), 10);
    }
}
