use std::time::Instant;

use axum::{
    body::{self, Body},
    extract::{Extension, State},
    http::Request,
    Json,
};
use serde::Serialize;
use tower::ServiceExt;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    timing::RequestTiming,
    AppState,
};

/// Number of in-process list calls made by one performance run.
pub const PERF_ITERATIONS: usize = 100;

const PERF_URI: &str = "/api/products";

#[derive(Debug, Serialize)]
pub struct PerformanceReport {
    pub execution_time: f64,
    pub iterations: usize,
}

// ── GET /api/test_performance ─────────────────────────────────────────────────

/// Dispatches `GET /api/products` through a copy of the router without going
/// over the network, and reports the total wall-clock time. Not a benchmark:
/// there is no warm-up and no percentile breakdown.
///
/// The router is built once per call, before the timed loop. Inner requests
/// pass through the timing middleware too, so one call writes
/// `PERF_ITERATIONS + 1` "Request processing time" lines.
pub async fn test_performance(
    State(state): State<AppState>,
    Extension(timing): Extension<RequestTiming>,
) -> AppResult<Json<PerformanceReport>> {
    let app = crate::build_router(state);

    let start = Instant::now();
    for _ in 0..PERF_ITERATIONS {
        let request = Request::builder()
            .uri(PERF_URI)
            .body(Body::empty())
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let response = app
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        if !response.status().is_success() {
            warn!(status = response.status().as_u16(), "Performance request failed");
        }

        body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }
    let execution_time = start.elapsed().as_secs_f64();

    info!(
        request_id = %timing.request_id,
        iterations = PERF_ITERATIONS,
        execution_time,
        "Performance run complete"
    );

    Ok(Json(PerformanceReport {
        execution_time,
        iterations: PERF_ITERATIONS,
    }))
}
