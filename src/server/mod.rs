//! Preview server for the build output
//!
//! Serves `dist/` as-is. With watching enabled, source changes trigger a
//! rebuild and every build outcome is pushed to open pages as a JSON event:
//! a successful build reloads the page (keeping the fragment), a failed one
//! is reported in the browser console and the old output stays up.

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebouncedEvent};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Site;

/// Websocket endpoint carrying build events
pub const EVENTS_PATH: &str = "/__livereload";

const EVENTS_CLIENT: &str = r#"<script>
new WebSocket('ws://' + location.host + '/__livereload').onmessage = function (msg) {
  var event = JSON.parse(msg.data);
  if (event.type === 'rebuilt') location.reload();
  if (event.type === 'failed') console.error('[hashsite] build failed: ' + event.message);
};
</script>
"#;

/// Outcome of a rebuild, as sent to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildEvent {
    Rebuilt { duration_ms: u64 },
    Failed { message: String },
}

struct ServerState {
    index: PathBuf,
    events: broadcast::Sender<BuildEvent>,
}

/// Serve the build output, rebuilding on source changes when `watch` is set
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool) -> Result<()> {
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let files = ServeDir::new(&site.dist_dir);
    let app = if watch {
        let (events, _) = broadcast::channel(16);
        let state = Arc::new(ServerState {
            index: site.dist_dir.join("index.html"),
            events: events.clone(),
        });

        let site = site.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_sources(&site, &events) {
                tracing::error!("File watcher stopped: {:#}", e);
            }
        });

        Router::new()
            .route("/", get(index_with_client))
            .route("/index.html", get(index_with_client))
            .route(EVENTS_PATH, get(events_socket))
            .fallback_service(files)
            .with_state(state)
    } else {
        Router::new().fallback_service(files)
    };

    println!("Serving {} at http://{}:{}", site.dist_dir.display(), ip, port);
    if watch {
        println!("Watching sources; pages reload after each rebuild.");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.layer(TraceLayer::new_for_http())).await?;
    Ok(())
}

/// Source directories whose changes trigger a rebuild
fn watched_dirs(site: &Site) -> Vec<PathBuf> {
    vec![
        site.data_dir.clone(),
        site.layouts_dir.clone(),
        site.styles_dir.clone(),
        site.core_dir.clone(),
        site.config_dir.clone(),
    ]
}

fn is_relevant(event: &DebouncedEvent) -> bool {
    let path = event.path.to_string_lossy();
    !path.contains(".git") && !path.contains(".DS_Store") && !path.ends_with('~')
}

/// Build once and describe the outcome
pub fn rebuild(site: &Site) -> BuildEvent {
    let start = Instant::now();
    match site.build() {
        Ok(()) => BuildEvent::Rebuilt {
            duration_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => BuildEvent::Failed {
            message: format!("{:#}", e),
        },
    }
}

fn watch_sources(site: &Site, events: &broadcast::Sender<BuildEvent>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for dir in watched_dirs(site).iter().filter(|d| d.exists()) {
        debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", dir);
    }
    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    for result in rx {
        let changed = match result {
            Ok(changed) => changed,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };
        let Some(first) = changed.iter().find(|e| is_relevant(e)) else {
            continue;
        };

        tracing::info!("Rebuilding after change to {}", first.path.display());
        let event = rebuild(site);
        match &event {
            BuildEvent::Rebuilt { duration_ms } => tracing::info!("Rebuilt in {}ms", duration_ms),
            BuildEvent::Failed { message } => tracing::error!("Rebuild failed: {}", message),
        }
        // no open pages is not an error
        let _ = events.send(event);
    }

    Ok(())
}

async fn index_with_client(State(state): State<Arc<ServerState>>) -> Response {
    match tokio::fs::read_to_string(&state.index).await {
        Ok(html) => Html(with_events_client(&html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "index.html has not been built").into_response(),
    }
}

async fn events_socket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let events = state.events.subscribe();
    ws.on_upgrade(move |socket| forward_events(socket, events))
}

async fn forward_events(mut socket: WebSocket, mut events: broadcast::Receiver<BuildEvent>) {
    loop {
        let received = tokio::select! {
            received = events.recv() => received,
            incoming = socket.recv() => match incoming {
                Some(Ok(_)) => continue,
                _ => break,
            },
        };

        let event = match received {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::debug!("Page missed {} build events", missed);
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        let Ok(payload) = serde_json::to_string(&event) else {
            continue;
        };
        if socket.send(Message::Text(payload)).await.is_err() {
            break;
        }
    }
}

/// Insert the event client before the last `</body>`, or append it
fn with_events_client(html: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => format!("{}{}{}", &html[..at], EVENTS_CLIENT, &html[at..]),
        None => format!("{}{}", html, EVENTS_CLIENT),
    }
}
