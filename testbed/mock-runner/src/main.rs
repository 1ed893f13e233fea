//! Stand-in for the external execution runner, for local development of the
//! terminal client. It compiles and runs nothing; it answers the wire
//! protocol with a canned transcript so the client's request lifecycle can be
//! exercised end to end.

use std::env;
use std::time::Duration;

use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use runpad_protocol::{RunRequest, RunResponse};
use tower_http::trace::TraceLayer;

async fn health_check() -> &'static str {
    "ok"
}

async fn run(Json(request): Json<RunRequest>) -> Json<RunResponse> {
    tracing::info!(
        code_bytes = request.code.len(),
        input_bytes = request.input.len(),
        "run request"
    );

    // MOCK_DELAY_MS simulates a slow runner, for testing the busy state and
    // the client-side timeout.
    if let Ok(delay) = env::var("MOCK_DELAY_MS") {
        if let Ok(delay_ms) = delay.parse::<u64>() {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    let mut transcript = format!(
        "[mock-runner] received {} bytes of code\n",
        request.code.len()
    );
    for (index, line) in request.input.lines().enumerate() {
        transcript.push_str(&format!("[mock-runner] stdin line {}: {}\n", index + 1, line));
    }

    Json(RunResponse::with_output(transcript))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let addr = env::var("MOCK_RUNNER_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string());

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/run", post(run))
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting mock runner on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
