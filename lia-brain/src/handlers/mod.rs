//! HTTP/WebSocket route handlers for LIA Brain
//!
//! Organized by functional area:
//! - `health`: Health check endpoint
//! - `status`: Status snapshot, desires, beliefs, memories, recall
//! - `experiences`: Pushing experiences and satisfying desires (POST)
//! - `websocket`: Live cycle events

pub mod experiences;
pub mod health;
pub mod status;
pub mod websocket;

use std::sync::Arc;
use tokio::sync::broadcast;
use warp::Filter;

use crate::being::CycleScheduler;
use crate::perception::inbox::InboxSender;
use crate::sinks::AgentEvent;

/// Compose all routes into a single filter
pub fn routes(
    scheduler: Arc<CycleScheduler>,
    inbox: InboxSender,
    events: broadcast::Sender<AgentEvent>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let ws = websocket::route(events);
    let health = health::route(scheduler.clone());
    let status_routes = status::routes(scheduler.clone());
    let experience_routes = experiences::routes(scheduler, inbox);

    ws.or(health).or(status_routes).or(experience_routes)
}
