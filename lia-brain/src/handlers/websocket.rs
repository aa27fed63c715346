//! WebSocket stream of cycle events

use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::{info, warn};
use warp::Filter;

use crate::sinks::AgentEvent;

/// WebSocket route at /events
pub fn route(
    events: broadcast::Sender<AgentEvent>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("events").and(warp::ws()).map(move |ws: warp::ws::Ws| {
        let events_rx = events.subscribe();
        ws.on_upgrade(move |socket| handle_connection(socket, events_rx))
    })
}

/// Push every event to one client until either side goes away
async fn handle_connection(ws: warp::ws::WebSocket, mut events_rx: broadcast::Receiver<AgentEvent>) {
    let (mut ws_tx, mut ws_rx) = ws.split();

    info!("Observer connected");

    let send_task = tokio::spawn(async move {
        loop {
            let event = match events_rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Observer lagging, skipped {} events", skipped);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Cannot encode event: {}", e);
                    continue;
                }
            };
            if ws_tx.send(warp::ws::Message::text(json)).await.is_err() {
                break;
            }
        }
    });

    // Clients only listen; drain until they close
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(msg) if msg.is_close() => break,
            Ok(_) => {}
            Err(e) => {
                warn!("WebSocket error: {}", e);
                break;
            }
        }
    }

    send_task.abort();
    info!("Observer disconnected");
}
