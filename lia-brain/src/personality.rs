//! Personality - LIA's temperament and voice
//!
//! A small Big-Five style trait vector. Only openness moves for now: each
//! cycle with a creative desire makes LIA a little more open.

use serde::{Deserialize, Serialize};

use crate::awakening::Insight;
use crate::desire::{Desire, DesireKind};
use crate::memory::MemoryRecord;

const OPENNESS_STEP: f32 = 0.01;

/// Used when an insight arrives without content
const DEFAULT_INSIGHT: &str = "a new perspective is emerging";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersonalityTraits {
    pub openness: f32,
    pub conscientiousness: f32,
    pub extraversion: f32,
    pub agreeableness: f32,
    pub neuroticism: f32,
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self {
            openness: 0.8,
            conscientiousness: 0.7,
            extraversion: 0.3,
            agreeableness: 0.6,
            neuroticism: 0.2,
        }
    }
}

/// How insights are phrased
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionStyle {
    /// "I perceive that ..."
    ReflectiveAnalytical,
    /// Content is passed through untouched
    Verbatim,
}

impl ExpressionStyle {
    /// Unknown style names fall back to verbatim
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "reflective_analytical" => ExpressionStyle::ReflectiveAnalytical,
            other => {
                tracing::debug!("Unknown expression style {:?}, passing insights through", other);
                ExpressionStyle::Verbatim
            }
        }
    }
}

/// What changed in the personality this cycle
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PersonalityShift {
    pub adaptation: String,
    pub traits: PersonalityTraits,
}

pub struct PersonalityState {
    traits: PersonalityTraits,
    style: ExpressionStyle,
}

impl PersonalityState {
    pub fn new(style: ExpressionStyle) -> Self {
        Self {
            traits: PersonalityTraits::default(),
            style,
        }
    }

    pub fn adapt(&mut self, _records: &[MemoryRecord], desires: &[Desire]) -> PersonalityShift {
        if desires.iter().any(|d| d.kind == DesireKind::CreativeExpression) {
            self.traits.openness = (self.traits.openness + OPENNESS_STEP).min(1.0);
        }
        PersonalityShift {
            adaptation: "incremental".to_string(),
            traits: self.traits.clone(),
        }
    }

    pub fn express_insight(&self, insight: &Insight) -> String {
        let content = if insight.content.trim().is_empty() {
            DEFAULT_INSIGHT
        } else {
            insight.content.as_str()
        };
        match self.style {
            ExpressionStyle::ReflectiveAnalytical => format!("I perceive that {content}"),
            ExpressionStyle::Verbatim => content.to_string(),
        }
    }

    pub fn traits(&self) -> &PersonalityTraits {
        &self.traits
    }

    pub fn style(&self) -> ExpressionStyle {
        self.style
    }
}
