use std::time::Duration;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use calibron::config::PuzzleConfig;
use calibron::solver::Solver;
use calibron::types::Solution;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

async fn solve(
    timeout: Option<Duration>,
    Json(config): Json<PuzzleConfig>,
) -> Result<Json<Solution>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&config).unwrap_or_default(),
        "POST /solve"
    );

    let solver = Solver::new(config).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    // The search never yields; a timeout only stops waiting for it.
    let task = tokio::task::spawn_blocking(move || solver.solve());
    let joined = match timeout {
        Some(limit) => tokio::time::timeout(limit, task).await.map_err(|_| {
            tracing::warn!(limit_secs = limit.as_secs(), "search timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                format!("search did not finish within {}s", limit.as_secs()),
            )
        })?,
        None => task.await,
    };

    let solution = joined.map_err(|e| {
        tracing::error!(error = %e, "search task failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "search task failed".to_string())
    })?;

    Ok(Json(solution))
}

#[tokio::main]
async fn main() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");
    let timeout = std::env::var("SOLVE_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs);

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route(
            "/solve",
            post(move |body: Json<PuzzleConfig>| solve(timeout, body)),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
