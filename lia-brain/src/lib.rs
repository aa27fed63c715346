//! # LIA Brain
//!
//! The cognitive engine: a memory stream, a world model, desires, a
//! personality, meta-learning and an awakening tracker, folded together
//! once per cycle by the scheduler.

pub mod awakening;
pub mod being;
pub mod config;
pub mod desire;
pub mod handlers;
pub mod memory;
pub mod meta_learning;
pub mod perception;
pub mod personality;
pub mod sinks;
pub mod world_model;

pub use being::{CancelToken, CycleScheduler, Mind, StatusSnapshot};
pub use config::BrainConfig;
pub use memory::{MemoryId, MemoryRecord, MemoryStore};
pub use perception::Perception;
pub use sinks::{FileStore, ObservabilitySink, PersistenceSink};
