//! Read-only views of the mind

use std::sync::Arc;
use serde::Deserialize;
use warp::http::StatusCode;
use warp::Filter;

use crate::being::CycleScheduler;
use crate::memory::MemoryId;

const DEFAULT_MEMORIES: usize = 50;
const DEFAULT_RECALL: usize = 10;

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct RecallQuery {
    max: Option<usize>,
}

/// Combine all status routes
pub fn routes(
    scheduler: Arc<CycleScheduler>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    status(scheduler.clone())
        .or(desires(scheduler.clone()))
        .or(beliefs(scheduler.clone()))
        .or(belief(scheduler.clone()))
        .or(memories(scheduler.clone()))
        .or(recall(scheduler))
}

/// GET /status - Full status snapshot
fn status(
    scheduler: Arc<CycleScheduler>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("status").and(warp::get()).map(move || {
        let status = scheduler.status();
        warp::reply::json(&status)
    })
}

/// GET /desires - Active desires
fn desires(
    scheduler: Arc<CycleScheduler>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("desires").and(warp::get()).map(move || {
        let active = scheduler.status().active_desires;
        warp::reply::json(&serde_json::json!({
            "total": active.len(),
            "total_intensity": active.iter().map(|d| d.intensity).sum::<f32>(),
            "desires": active
        }))
    })
}

/// GET /beliefs - World model beliefs, sorted by concept
fn beliefs(
    scheduler: Arc<CycleScheduler>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("beliefs").and(warp::get()).map(move || {
        let beliefs: Vec<serde_json::Value> = scheduler
            .beliefs()
            .into_iter()
            .map(|(concept, belief)| {
                serde_json::json!({
                    "concept": concept,
                    "confidence": belief.confidence,
                    "sources": belief.source_ids.len(),
                    "first_observed": belief.first_observed,
                    "last_updated": belief.last_updated
                })
            })
            .collect();
        warp::reply::json(&serde_json::json!({
            "total": beliefs.len(),
            "beliefs": beliefs
        }))
    })
}

/// GET /beliefs/{concept} - One belief, 404 if LIA has none
fn belief(
    scheduler: Arc<CycleScheduler>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("beliefs" / String)
        .and(warp::get())
        .map(move |concept: String| match scheduler.belief(&concept) {
            Some(belief) => warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "concept": concept,
                    "belief": belief
                })),
                StatusCode::OK,
            ),
            None => warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "error": format!("no belief about {}", concept)
                })),
                StatusCode::NOT_FOUND,
            ),
        })
}

/// GET /memories?limit=N - Most recent memories first
fn memories(
    scheduler: Arc<CycleScheduler>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("memories")
        .and(warp::get())
        .and(warp::query::<LimitQuery>())
        .map(move |query: LimitQuery| {
            let records = scheduler.recent_memories(query.limit.unwrap_or(DEFAULT_MEMORIES));
            warp::reply::json(&serde_json::json!({
                "total": scheduler.status().memory_count,
                "showing": records.len(),
                "memories": records
            }))
        })
}

/// GET /recall/{id}?max=N - Memories associated with one record
fn recall(
    scheduler: Arc<CycleScheduler>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("recall" / u64)
        .and(warp::get())
        .and(warp::query::<RecallQuery>())
        .map(move |id: u64, query: RecallQuery| {
            let id = MemoryId(id);
            let recalled = scheduler.recall(id, query.max.unwrap_or(DEFAULT_RECALL));
            warp::reply::json(&serde_json::json!({
                "source": id,
                "recalled": recalled
            }))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::being::Mind;
    use crate::perception::Perception;
    use crate::sinks::{FileStore, TracingObserver};
    use lia_core::LiaConfig;
    use std::time::Duration;

    #[tokio::test]
    async fn test_belief_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let scheduler = CycleScheduler::new(
            Mind::new(&LiaConfig::default()),
            Perception::new(Vec::new(), Duration::from_secs(1)),
            Arc::new(FileStore::new(dir.path())),
            Arc::new(TracingObserver),
            Duration::from_secs(10),
        );
        let api = routes(scheduler);

        let missing = warp::test::request().path("/beliefs/trend").reply(&api).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let status = warp::test::request().path("/status").reply(&api).await;
        assert_eq!(status.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(status.body()).unwrap();
        assert_eq!(body["memory_capacity"], 10_000);
        assert_eq!(body["breakthroughs"], 0);
    }
}
