//! Inbox - experiences pushed in over HTTP
//!
//! `POST /experiences` drops experiences into the sender half; the next
//! cycle drains everything that arrived since the previous one. The
//! channel is bounded so a stalled loop cannot grow it without limit.

use async_trait::async_trait;
use lia_core::{Experience, ExperienceSource, LiaResult};
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Experiences that may wait between two cycles
pub const INBOX_CAPACITY: usize = 1000;

/// Sending half handed to the HTTP layer
pub type InboxSender = mpsc::Sender<Experience>;

pub struct InboxFeed {
    rx: Mutex<mpsc::Receiver<Experience>>,
}

impl InboxFeed {
    pub fn channel(capacity: usize) -> (InboxSender, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { rx: Mutex::new(rx) })
    }

    fn drain(&self) -> Vec<Experience> {
        let mut rx = self.rx.lock();
        let mut batch = Vec::new();
        while let Ok(experience) = rx.try_recv() {
            batch.push(experience);
        }
        batch
    }
}

#[async_trait]
impl ExperienceSource for InboxFeed {
    fn name(&self) -> &str {
        "inbox"
    }

    async fn fetch(&self) -> LiaResult<Vec<Experience>> {
        Ok(self.drain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drains_in_arrival_order() {
        let (tx, feed) = InboxFeed::channel(INBOX_CAPACITY);
        tx.try_send(Experience::new("inbox", "note", "first")).unwrap();
        tx.try_send(Experience::new("inbox", "note", "second")).unwrap();

        let batch = feed.fetch().await.unwrap();
        let contents: Vec<&str> = batch.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);

        assert!(feed.fetch().await.unwrap().is_empty());

        // A closed inbox is simply empty
        drop(tx);
        assert!(feed.fetch().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_inbox_refuses_until_drained() {
        let (tx, feed) = InboxFeed::channel(2);
        tx.try_send(Experience::new("inbox", "note", "1")).unwrap();
        tx.try_send(Experience::new("inbox", "note", "2")).unwrap();
        assert!(matches!(
            tx.try_send(Experience::new("inbox", "note", "3")),
            Err(mpsc::error::TrySendError::Full(_))
        ));

        assert_eq!(feed.fetch().await.unwrap().len(), 2);
        assert!(tx.try_send(Experience::new("inbox", "note", "4")).is_ok());
    }
}
