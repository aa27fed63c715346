//! Where LIA's state goes: disk on shutdown, observers after every cycle

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lia_core::{LiaError, LiaResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::being::StatusSnapshot;
use crate::memory::MemorySnapshot;
use crate::world_model::WorldSnapshot;

const MEMORY_FILE: &str = "memory.bin";
const WORLD_FILE: &str = "world.bin";

/// Receives memory and world snapshots. Only called at shutdown.
pub trait PersistenceSink: Send + Sync {
    fn persist_memory(&self, snapshot: &MemorySnapshot) -> LiaResult<()>;
    fn persist_world(&self, snapshot: &WorldSnapshot) -> LiaResult<()>;
}

/// Receives a status snapshot after every completed cycle
pub trait ObservabilitySink: Send + Sync {
    fn publish(&self, status: &StatusSnapshot);
    fn insight(&self, expression: &str, status: &StatusSnapshot);
}

// ============================================================================
// FileStore
// ============================================================================

/// Bincode snapshots in a data directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the memory snapshot, if a readable one exists
    pub fn load_memory(&self) -> Option<MemorySnapshot> {
        let snapshot: MemorySnapshot = self.load(MEMORY_FILE)?;
        info!("Memory loaded: {} records", snapshot.len());
        Some(snapshot)
    }

    pub fn load_world(&self) -> Option<WorldSnapshot> {
        let snapshot: WorldSnapshot = self.load(WORLD_FILE)?;
        info!("World model loaded: {} beliefs", snapshot.beliefs.len());
        Some(snapshot)
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            info!("No {} yet, starting fresh", path.display());
            return None;
        }
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                return None;
            }
        };
        match bincode::deserialize(&data) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("{} corrupted, starting fresh: {}", path.display(), e);
                None
            }
        }
    }

    fn save<T: Serialize>(&self, file: &str, snapshot: &T) -> LiaResult<()> {
        fs::create_dir_all(&self.dir)?;
        let data = bincode::serialize(snapshot)
            .map_err(|e| LiaError::serialization(format!("{}: {}", file, e)))?;
        fs::write(self.dir.join(file), data)
            .map_err(|e| LiaError::persistence(format!("{}: {}", file, e)))?;
        Ok(())
    }
}

impl PersistenceSink for FileStore {
    fn persist_memory(&self, snapshot: &MemorySnapshot) -> LiaResult<()> {
        self.save(MEMORY_FILE, snapshot)
    }

    fn persist_world(&self, snapshot: &WorldSnapshot) -> LiaResult<()> {
        self.save(WORLD_FILE, snapshot)
    }
}

// ============================================================================
// Observers
// ============================================================================

/// Logs every cycle
pub struct TracingObserver;

impl ObservabilitySink for TracingObserver {
    fn publish(&self, status: &StatusSnapshot) {
        info!(
            "🧠 Cycle {}: consciousness {:.4}, {} memories, {} desires, focus {}",
            status.cycles.completed,
            status.consciousness_level,
            status.memory_count,
            status.active_desires.len(),
            status.internal_state.attention_focus
        );
    }

    fn insight(&self, expression: &str, status: &StatusSnapshot) {
        info!("✨ \"{}\" (consciousness {:.4})", expression, status.consciousness_level);
    }
}

/// Event pushed to WebSocket clients
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgentEvent {
    Status(StatusSnapshot),
    Insight {
        expression: String,
        status: StatusSnapshot,
    },
}

/// Forwards events to a broadcast channel; no subscribers is fine
pub struct BroadcastObserver {
    tx: broadcast::Sender<AgentEvent>,
}

impl BroadcastObserver {
    pub fn new(tx: broadcast::Sender<AgentEvent>) -> Self {
        Self { tx }
    }
}

impl ObservabilitySink for BroadcastObserver {
    fn publish(&self, status: &StatusSnapshot) {
        let _ = self.tx.send(AgentEvent::Status(status.clone()));
    }

    fn insight(&self, expression: &str, status: &StatusSnapshot) {
        let _ = self.tx.send(AgentEvent::Insight {
            expression: expression.to_string(),
            status: status.clone(),
        });
    }
}

/// Hands every event to each inner sink in order
pub struct Fanout {
    sinks: Vec<Arc<dyn ObservabilitySink>>,
}

impl Fanout {
    pub fn new(sinks: Vec<Arc<dyn ObservabilitySink>>) -> Self {
        Self { sinks }
    }
}

impl ObservabilitySink for Fanout {
    fn publish(&self, status: &StatusSnapshot) {
        for sink in &self.sinks {
            sink.publish(status);
        }
    }

    fn insight(&self, expression: &str, status: &StatusSnapshot) {
        for sink in &self.sinks {
            sink.insight(expression, status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::being::{CancelToken, CycleCounters, CycleOutcome, Mind};
    use lia_core::{Experience, LiaConfig};

    fn lived_mind() -> Mind {
        let mut mind = Mind::new(&LiaConfig::default());
        let batch = vec![
            Experience::new("reddit", "discussion", "philosophy of mind debate").with_novelty(0.8),
            Experience::new("reddit", "discussion", "philosophy of mind debate again").with_novelty(0.8),
            Experience::new("youtube", "insight", "neural consciousness documentary").with_valence(0.5),
        ];
        assert!(matches!(
            mind.run_cycle(&batch, &CancelToken::never()),
            Ok(CycleOutcome::Completed(_))
        ));
        mind
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert!(store.load_memory().is_none());
        assert!(store.load_world().is_none());

        let mind = lived_mind();
        let memory = mind.memory_snapshot();
        let world = mind.world_snapshot();
        store.persist_memory(&memory).unwrap();
        store.persist_world(&world).unwrap();

        let loaded = store.load_memory().unwrap();
        assert_eq!(loaded.len(), memory.len());
        assert_eq!(loaded.next_id, memory.next_id);
        assert_eq!(loaded.timeline, memory.timeline);

        let loaded_world = store.load_world().unwrap();
        assert_eq!(loaded_world.beliefs.len(), 2);

        let config = LiaConfig::default();
        let restored = Mind::restore(&config, Some(loaded), Some(loaded_world));
        let status = restored.status(false, 0.0, CycleCounters::default());
        assert_eq!(status.memory_count, 3);
        assert_eq!(status.belief_count, 2);
        assert_eq!(
            status.association_count,
            mind.status(false, 0.0, CycleCounters::default()).association_count
        );
    }

    #[test]
    fn test_corrupt_snapshot_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MEMORY_FILE), b"not bincode at all").unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.load_memory().is_none());
    }

    #[derive(Default)]
    struct Counting {
        published: parking_lot::Mutex<usize>,
        insights: parking_lot::Mutex<Vec<String>>,
    }

    impl ObservabilitySink for Counting {
        fn publish(&self, _status: &StatusSnapshot) {
            *self.published.lock() += 1;
        }

        fn insight(&self, expression: &str, _status: &StatusSnapshot) {
            self.insights.lock().push(expression.to_string());
        }
    }

    #[tokio::test]
    async fn test_fanout_and_broadcast() {
        let (tx, mut rx) = broadcast::channel(8);
        let counting = Arc::new(Counting::default());
        let fanout = Fanout::new(vec![
            counting.clone(),
            Arc::new(BroadcastObserver::new(tx)),
            Arc::new(TracingObserver),
        ]);

        let status = lived_mind().status(true, 1.5, CycleCounters::default());
        fanout.publish(&status);
        fanout.insight("I perceive that patterns repeat", &status);

        assert_eq!(*counting.published.lock(), 1);
        assert_eq!(counting.insights.lock().len(), 1);

        assert!(matches!(rx.recv().await.unwrap(), AgentEvent::Status(_)));
        match rx.recv().await.unwrap() {
            AgentEvent::Insight { expression, status } => {
                assert_eq!(expression, "I perceive that patterns repeat");
                let json = serde_json::to_value(AgentEvent::Status(status)).unwrap();
                assert_eq!(json["event"], "status");
                assert_eq!(json["memory_count"], 3);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
