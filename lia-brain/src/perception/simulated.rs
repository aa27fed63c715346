//! Simulated social feeds
//!
//! Stand-ins for the twitter, youtube and reddit collectors. Each fetch
//! yields one experience per platform with a little jitter on the scores,
//! so LIA has something to think about without any network access.

use async_trait::async_trait;
use lia_core::{clamp01, Experience, ExperienceSource, LiaResult};
use rand::Rng;

struct Template {
    platform: &'static str,
    kind: &'static str,
    content: &'static str,
    valence: f32,
    novelty: f32,
}

const TEMPLATES: [Template; 3] = [
    Template {
        platform: "twitter",
        kind: "trend",
        content: "AI breakthroughs shaping society today",
        valence: 0.3,
        novelty: 0.7,
    },
    Template {
        platform: "youtube",
        kind: "insight",
        content: "Long-form documentary on neural consciousness",
        valence: 0.5,
        novelty: 0.6,
    },
    Template {
        platform: "reddit",
        kind: "discussion",
        content: "Community debate on philosophy of mind",
        valence: 0.4,
        novelty: 0.8,
    },
];

pub struct SimulatedFeed {
    /// Maximum deviation applied to valence and novelty
    jitter: f32,
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl SimulatedFeed {
    pub fn new(jitter: f32) -> Self {
        Self {
            jitter: jitter.abs(),
        }
    }

    fn generate(&self) -> Vec<Experience> {
        let mut rng = rand::thread_rng();
        TEMPLATES
            .iter()
            .map(|t| {
                let (dv, dn) = if self.jitter > 0.0 {
                    (
                        rng.gen_range(-self.jitter..=self.jitter),
                        rng.gen_range(-self.jitter..=self.jitter),
                    )
                } else {
                    (0.0, 0.0)
                };
                Experience::new(t.platform, t.kind, t.content)
                    .with_valence((t.valence + dv).clamp(-1.0, 1.0))
                    .with_novelty(clamp01(t.novelty + dn))
            })
            .collect()
    }
}

#[async_trait]
impl ExperienceSource for SimulatedFeed {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn fetch(&self) -> LiaResult<Vec<Experience>> {
        Ok(self.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_one_experience_per_platform() {
        let feed = SimulatedFeed::new(0.0);
        let batch = feed.fetch().await.unwrap();
        let platforms: Vec<&str> = batch.iter().map(|e| e.platform.as_str()).collect();
        assert_eq!(platforms, vec!["twitter", "youtube", "reddit"]);
        assert_eq!(batch[2].kind, "discussion");
        assert!((batch[2].novelty - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let feed = SimulatedFeed::new(0.5);
        for _ in 0..100 {
            for e in feed.generate() {
                assert!((0.0..=1.0).contains(&e.novelty));
                assert!((-1.0..=1.0).contains(&e.emotional_valence));
            }
        }
    }
}
