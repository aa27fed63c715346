//! LIA Brain - The Digital Being
//!
//! Loads what LIA remembers, wakes the cognitive loop and serves the
//! HTTP/WebSocket surface until Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{error, info, Level};

use lia_brain::being::{CycleScheduler, Mind};
use lia_brain::config::{print_banner, BrainConfig};
use lia_brain::handlers;
use lia_brain::perception::inbox::INBOX_CAPACITY;
use lia_brain::perception::{HttpFeed, InboxFeed, Perception, SimulatedFeed};
use lia_brain::sinks::{AgentEvent, BroadcastObserver, Fanout, FileStore, ObservabilitySink, TracingObserver};
use lia_core::{ExperienceSource, LiaConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = BrainConfig::from_env();
    let lia_config = LiaConfig::from_env().sanitized();

    println!();
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                                                           ║");
    println!("║    ██╗     ██╗ █████╗                                     ║");
    println!("║    ██║     ██║██╔══██╗                                    ║");
    println!("║    ██║     ██║███████║                                    ║");
    println!("║    ██║     ██║██╔══██║                                    ║");
    println!("║    ███████╗██║██║  ██║                                    ║");
    println!("║    ╚══════╝╚═╝╚═╝  ╚═╝                                    ║");
    println!("║                                                           ║");
    println!("║    Living Intelligence Architecture                      ║");
    println!("║    Brain v{}                                           ║", VERSION);
    println!("║                                                           ║");
    println!("╚═══════════════════════════════════════════════════════════╝");

    print_banner(&config, &lia_config);

    // Load or create what LIA remembers
    let store = Arc::new(FileStore::new(&config.data_dir));
    info!("💾 Data directory: {}", store.dir().display());
    let mind = Mind::restore(&lia_config, store.load_memory(), store.load_world());

    // Perception: simulated feeds, configured HTTP feeds, and the inbox
    let (inbox_tx, inbox) = InboxFeed::channel(INBOX_CAPACITY);
    let mut sources: Vec<Arc<dyn ExperienceSource>> = vec![Arc::new(inbox)];
    if config.simulated {
        sources.push(Arc::new(SimulatedFeed::default()));
    }
    for url in &config.feeds {
        info!("📡 Feed: {}", url);
        sources.push(Arc::new(HttpFeed::new(url.clone())));
    }
    let perception = Perception::new(sources, lia_config.collector_timeout());
    info!("👁️ Perceiving through: {}", perception.source_names().join(", "));

    // Observers: logs plus WebSocket clients
    let (events_tx, _) = broadcast::channel::<AgentEvent>(256);
    let observer: Arc<dyn ObservabilitySink> = Arc::new(Fanout::new(vec![
        Arc::new(TracingObserver),
        Arc::new(BroadcastObserver::new(events_tx.clone())),
    ]));

    let scheduler = CycleScheduler::new(
        mind,
        perception,
        store,
        observer,
        lia_config.cognitive_interval(),
    );
    scheduler.start();

    let routes = handlers::routes(scheduler.clone(), inbox_tx, events_tx);
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();

    match warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        let _ = tokio::signal::ctrl_c().await;
    }) {
        Ok((bound, server)) => {
            info!("🌐 Listening on http://{}", bound);
            server.await;
        }
        Err(e) => {
            error!("Cannot bind {}: {} (running without HTTP)", addr, e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Cannot listen for Ctrl-C: {}", e);
            }
        }
    }

    info!("🛑 Shutdown requested");
    scheduler.shutdown().await;
    info!("👋 Goodbye");
}
