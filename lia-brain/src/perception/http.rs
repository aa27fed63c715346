//! HTTP feed - polls a URL that serves a JSON array of experiences

use async_trait::async_trait;
use lia_core::{Experience, ExperienceSource, LiaError, LiaResult};
use tracing::debug;

pub struct HttpFeed {
    url: String,
    client: reqwest::Client,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ExperienceSource for HttpFeed {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> LiaResult<Vec<Experience>> {
        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", concat!("LIA/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| LiaError::network(format!("GET {}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LiaError::network(format!("GET {}: HTTP {}", self.url, status)));
        }

        let batch: Vec<Experience> = response
            .json()
            .await
            .map_err(|e| LiaError::serialization(format!("{}: {}", self.url, e)))?;
        debug!("Fetched {} experiences from {}", batch.len(), self.url);
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_feed_is_a_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let feed = HttpFeed::new("http://127.0.0.1:9/experiences");
        assert_eq!(feed.name(), "http://127.0.0.1:9/experiences");
        match feed.fetch().await {
            Err(LiaError::Network(msg)) => assert!(msg.contains("127.0.0.1:9")),
            other => panic!("expected a network error, got {:?}", other),
        }
    }
}
