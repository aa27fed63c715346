//! Health check endpoint

use std::sync::Arc;
use warp::Filter;

use crate::being::CycleScheduler;

/// GET /health - Alive, and whether the loop is awake
pub fn route(
    scheduler: Arc<CycleScheduler>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("health").and(warp::path::end()).map(move || {
        warp::reply::json(&serde_json::json!({
            "status": "alive",
            "awake": scheduler.is_awake(),
        }))
    })
}
