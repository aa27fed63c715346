//! Perception - gathering experiences from every source
//!
//! Sources are polled concurrently. A source that errors or takes longer
//! than the collector timeout contributes nothing this cycle; the others
//! are unaffected.

pub mod http;
pub mod inbox;
pub mod simulated;

pub use http::HttpFeed;
pub use inbox::InboxFeed;
pub use simulated::SimulatedFeed;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use lia_core::{Experience, ExperienceSource};
use tracing::{debug, warn};

pub struct Perception {
    sources: Vec<Arc<dyn ExperienceSource>>,
    timeout: Duration,
}

impl Perception {
    pub fn new(sources: Vec<Arc<dyn ExperienceSource>>, timeout: Duration) -> Self {
        Self { sources, timeout }
    }

    /// Collect one batch, in source order. Never fails.
    pub async fn gather(&self) -> Vec<Experience> {
        let fetches = self.sources.iter().map(|source| async move {
            match tokio::time::timeout(self.timeout, source.fetch()).await {
                Ok(Ok(batch)) => batch,
                Ok(Err(e)) => {
                    warn!("Source {} failed: {}", source.name(), e);
                    Vec::new()
                }
                Err(_) => {
                    warn!("Source {} timed out after {:?}", source.name(), self.timeout);
                    Vec::new()
                }
            }
        });

        let experiences: Vec<Experience> = join_all(fetches).await.into_iter().flatten().collect();
        debug!("Gathered {} experiences from {} sources", experiences.len(), self.sources.len());
        experiences
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}
