//! Playpen web server
//!
//! Serves the playground page and the `/run` endpoint: submitted source goes
//! through the playpen runner and comes back as JSON with either the captured
//! output or a classified error message.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use clap::Parser;
use playpen::{Config, Runner};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Page template embedded at compile time; `{{sample}}` is replaced with the
/// configured sample program.
const PAGE_TEMPLATE: &str = include_str!("../assets/index.html");

const DEFAULT_PORT: u16 = 8080;

#[derive(Parser)]
#[command(name = "playpen-server")]
#[command(about = "A web playground for deadline-bounded code execution")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (falls back to the PORT environment variable, then 8080)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served under /static/
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone)]
struct AppState {
    runner: Runner,
}

#[derive(Deserialize)]
struct RunForm {
    #[serde(default)]
    code: String,
}

/// Wire response: exactly one of `output` / `error` is present.
#[derive(Serialize)]
struct RunResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if let Some(ref path) = cli.config {
        info!(?path, "loading configuration");
        Config::from_file(path).context("failed to load configuration")?
    } else {
        debug!("using default configuration");
        Config::default()
    };

    let port = cli
        .port
        .or_else(port_from_env)
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let state = AppState {
        runner: Runner::new(config),
    };
    let router = app(state, &cli.static_dir);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "playpen server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn port_from_env() -> Option<u16> {
    let raw = std::env::var("PORT").ok()?;
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!(%raw, "ignoring unparsable PORT environment variable");
            None
        }
    }
}

fn app(state: AppState, static_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/run", post(run_code))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let sample = &state.runner.config().toolchain.sample;
    Html(PAGE_TEMPLATE.replace("{{sample}}", &escape_html(sample)))
}

async fn run_code(State(state): State<AppState>, Form(form): Form<RunForm>) -> Response {
    if form.code.is_empty() {
        return (StatusCode::BAD_REQUEST, "No code provided").into_response();
    }

    match state.runner.run(&form.code).await {
        Ok(output) => Json(RunResponse {
            output: Some(output),
            error: None,
        })
        .into_response(),
        Err(e) => {
            // Error kinds collapse into a message string at the HTTP boundary
            debug!(kind = e.kind(), "run failed");
            Json(RunResponse {
                output: None,
                error: Some(e.to_string()),
            })
            .into_response()
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to install ctrl-c handler: {e}");
        return;
    }
    info!("shutdown signal received");
}
