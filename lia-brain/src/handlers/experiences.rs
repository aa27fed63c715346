//! Write endpoints: feeding experiences in, calming desires down

use std::sync::Arc;
use serde::Deserialize;
use tokio::sync::mpsc::error::TrySendError;
use warp::http::StatusCode;
use warp::Filter;

use lia_core::Experience;

use crate::being::CycleScheduler;
use crate::desire::DesireKind;
use crate::perception::inbox::InboxSender;

/// Largest accepted JSON body
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// A single experience or a batch
#[derive(Deserialize)]
#[serde(untagged)]
enum ExperienceBody {
    Many(Vec<Experience>),
    One(Experience),
}

#[derive(Deserialize)]
struct SatisfyBody {
    kind: DesireKind,
    level: f32,
}

/// Combine all write routes
pub fn routes(
    scheduler: Arc<CycleScheduler>,
    inbox: InboxSender,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    push_experiences(inbox).or(satisfy_desire(scheduler))
}

/// POST /experiences - Queue experiences for the next cycle
///
/// Answers 503 once the inbox is full; whatever was queued before that
/// point stays queued and is reported back.
fn push_experiences(
    inbox: InboxSender,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("experiences")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .map(move |body: ExperienceBody| {
            let batch = match body {
                ExperienceBody::Many(batch) => batch,
                ExperienceBody::One(experience) => vec![experience],
            };
            let count = batch.len();
            for (queued, experience) in batch.into_iter().enumerate() {
                let error = match inbox.try_send(experience) {
                    Ok(()) => continue,
                    Err(TrySendError::Full(_)) => "inbox full",
                    Err(TrySendError::Closed(_)) => "LIA is asleep",
                };
                tracing::warn!("Refused experience {}/{}: {}", queued + 1, count, error);
                return warp::reply::with_status(
                    warp::reply::json(&serde_json::json!({
                        "error": error,
                        "queued": queued
                    })),
                    StatusCode::SERVICE_UNAVAILABLE,
                );
            }
            tracing::debug!("Queued {} experiences", count);
            warp::reply::with_status(
                warp::reply::json(&serde_json::json!({ "queued": count })),
                StatusCode::ACCEPTED,
            )
        })
}

/// POST /desires/satisfy - `{"kind": "knowledge_seeking", "level": 0.5}`
fn satisfy_desire(
    scheduler: Arc<CycleScheduler>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("desires" / "satisfy")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .map(move |body: SatisfyBody| {
            scheduler.satisfy(body.kind, body.level);
            let remaining: Vec<_> = scheduler
                .status()
                .active_desires
                .into_iter()
                .filter(|d| d.kind == body.kind)
                .collect();
            warp::reply::json(&serde_json::json!({
                "kind": body.kind.name(),
                "remaining": remaining
            }))
        })
}
