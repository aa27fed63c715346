//! The cognitive loop
//!
//! One cycle at a time, spaced by the configured interval. Shutdown
//! cancels whatever is in flight, waits for it to settle and then
//! persists memory and world exactly once.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lia_core::LiaResult;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{CancelToken, CycleCounters, CycleOutcome, Mind, StatusSnapshot};
use crate::desire::DesireKind;
use crate::memory::{MemoryId, MemoryRecord};
use crate::perception::Perception;
use crate::sinks::{ObservabilitySink, PersistenceSink};
use crate::world_model::Belief;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopPhase {
    Idle,
    Running,
    Stopped,
}

#[derive(Default)]
struct Counters {
    started: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    cancelled: AtomicU64,
    insights: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> CycleCounters {
        CycleCounters {
            started: self.started.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            insights: self.insights.load(Ordering::Relaxed),
        }
    }
}

pub struct CycleScheduler {
    mind: Mutex<Mind>,
    perception: Perception,
    persistence: Arc<dyn PersistenceSink>,
    observer: Arc<dyn ObservabilitySink>,
    interval: Duration,
    phase: Mutex<LoopPhase>,
    cancel_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
    counters: Counters,
    awake: AtomicBool,
    started_at: Instant,
}

impl CycleScheduler {
    pub fn new(
        mind: Mind,
        perception: Perception,
        persistence: Arc<dyn PersistenceSink>,
        observer: Arc<dyn ObservabilitySink>,
        interval: Duration,
    ) -> Arc<Self> {
        let (cancel_tx, _) = watch::channel(false);
        Arc::new(Self {
            mind: Mutex::new(mind),
            perception,
            persistence,
            observer,
            interval,
            phase: Mutex::new(LoopPhase::Idle),
            cancel_tx,
            handle: Mutex::new(None),
            counters: Counters::default(),
            awake: AtomicBool::new(false),
            started_at: Instant::now(),
        })
    }

    /// Begin the loop. Does nothing if it is already running or stopped.
    pub fn start(self: &Arc<Self>) {
        let mut phase = self.phase.lock();
        if *phase != LoopPhase::Idle {
            debug!("Cognitive loop already {:?}, ignoring start", *phase);
            return;
        }
        *phase = LoopPhase::Running;
        self.awake.store(true, Ordering::SeqCst);

        info!("🌅 LIA is awakening (cycle every {:?})", self.interval);
        let handle = tokio::spawn(self.clone().run_loop());
        *self.handle.lock() = Some(handle);
    }

    /// Stop the loop and persist. Only the first call after `start` acts.
    pub async fn shutdown(&self) {
        {
            let mut phase = self.phase.lock();
            if *phase != LoopPhase::Running {
                debug!("Cognitive loop {:?}, nothing to shut down", *phase);
                return;
            }
            *phase = LoopPhase::Stopped;
        }
        info!("🌙 LIA is going to sleep...");
        self.awake.store(false, Ordering::SeqCst);
        self.cancel_tx.send_replace(true);

        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!("Cognitive loop ended abnormally: {}", e);
            }
        }

        let (memory, world) = {
            let mind = self.mind.lock();
            (mind.memory_snapshot(), mind.world_snapshot())
        };
        match self.persistence.persist_memory(&memory) {
            Ok(()) => info!("💾 Saved {} memories", memory.len()),
            Err(e) => error!("Failed to save memories: {}", e),
        }
        match self.persistence.persist_world(&world) {
            Ok(()) => info!("💾 Saved {} beliefs", world.beliefs.len()),
            Err(e) => error!("Failed to save world model: {}", e),
        }

        let counters = self.counters.snapshot();
        info!(
            "💤 LIA is asleep after {} cycles ({} failed, {} insights)",
            counters.completed, counters.failed, counters.insights
        );
    }

    async fn run_loop(self: Arc<Self>) {
        let mut cancel = CancelToken::new(self.cancel_tx.subscribe());

        loop {
            if cancel.is_cancelled() {
                break;
            }
            let cycle_no = self.counters.started.fetch_add(1, Ordering::Relaxed) + 1;

            // Each cycle runs in its own task so a panic only costs one cycle
            let cycle = tokio::spawn(self.clone().cognitive_cycle(cancel.clone()));
            match cycle.await {
                Ok(Ok(CycleOutcome::Completed(report))) => {
                    debug!(
                        "Cycle {}: {} experiences, {} new memories, {} desires",
                        cycle_no, report.experiences, report.new_memories, report.active_desires
                    );
                }
                Ok(Ok(CycleOutcome::Cancelled)) => {
                    self.counters.cancelled.fetch_add(1, Ordering::Relaxed);
                    info!("Cycle {} cancelled", cycle_no);
                    break;
                }
                Ok(Err(e)) => {
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                    error!("Cycle {} failed: {}", cycle_no, e);
                }
                Err(e) => {
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                    error!("Cycle {} panicked: {}", cycle_no, e);
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = cancel.cancelled() => break,
            }
        }
        debug!("Cognitive loop exited");
    }

    async fn cognitive_cycle(self: Arc<Self>, mut cancel: CancelToken) -> LiaResult<CycleOutcome> {
        let experiences = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(CycleOutcome::Cancelled),
            batch = self.perception.gather() => batch,
        };

        // The lock is never held across an await
        let (outcome, status) = {
            let mut mind = self.mind.lock();
            let outcome = mind.run_cycle(&experiences, &cancel)?;
            if let CycleOutcome::Completed(report) = &outcome {
                self.counters.completed.fetch_add(1, Ordering::Relaxed);
                if report.insight.is_some() {
                    self.counters.insights.fetch_add(1, Ordering::Relaxed);
                }
            }
            let status = mind.status(self.is_awake(), self.uptime(), self.counters.snapshot());
            (outcome, status)
        };

        if let CycleOutcome::Completed(report) = &outcome {
            self.observer.publish(&status);
            if let Some(expression) = &report.insight {
                self.observer.insight(expression, &status);
            }
        }
        Ok(outcome)
    }

    pub fn status(&self) -> StatusSnapshot {
        let counters = self.counters.snapshot();
        self.mind.lock().status(self.is_awake(), self.uptime(), counters)
    }

    pub fn counters(&self) -> CycleCounters {
        self.counters.snapshot()
    }

    pub fn recall(&self, id: MemoryId, max_results: usize) -> Vec<MemoryRecord> {
        self.mind.lock().recall(id, max_results)
    }

    pub fn satisfy(&self, kind: DesireKind, satisfaction_level: f32) {
        if !(0.0..=1.0).contains(&satisfaction_level) {
            warn!("Satisfaction level {} clamped to [0, 1]", satisfaction_level);
        }
        self.mind.lock().satisfy_desire(kind, satisfaction_level);
    }

    pub fn recent_memories(&self, limit: usize) -> Vec<MemoryRecord> {
        self.mind.lock().recent_memories(limit)
    }

    pub fn beliefs(&self) -> Vec<(String, Belief)> {
        self.mind.lock().beliefs()
    }

    pub fn belief(&self, concept: &str) -> Option<Belief> {
        self.mind.lock().belief(concept)
    }

    pub fn is_running(&self) -> bool {
        *self.phase.lock() == LoopPhase::Running
    }

    pub fn is_awake(&self) -> bool {
        self.awake.load(Ordering::SeqCst)
    }

    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
