//! Branch Chat - conversations as a tree
//!
//! Every message becomes a node hanging off the current tip. Selecting any
//! earlier node in the graph view rewinds the chat to that point, and the
//! next message starts a new branch from there.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod conversation;
mod core;
mod routes;

use crate::config::Config;
use crate::core::{EchoResponder, SessionManager};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "branch_chat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let settings = config.load_settings()?;
    if let Some(path) = &config.settings_path {
        tracing::info!("Loaded settings from {}", path.display());
    }

    let responder = Arc::new(EchoResponder::new(settings.responder.prefix.clone()));
    let sessions = Arc::new(SessionManager::new(responder, settings.session_settings()));

    let state = AppState { sessions };

    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Branch Chat API running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
