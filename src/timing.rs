use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;
use uuid::Uuid;

/// Per-request timing context, inserted into the request extensions before the
/// handler runs. Handlers can pull it out with `Extension<RequestTiming>`.
#[derive(Debug, Clone, Copy)]
pub struct RequestTiming {
    pub request_id: Uuid,
    pub started_at: Instant,
}

impl RequestTiming {
    pub fn start() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Wraps the whole handler chain, so the log line is written for error
/// responses as well as successful ones.
pub async fn track_request_time(mut req: Request, next: Next) -> Response {
    let timing = RequestTiming::start();
    req.extensions_mut().insert(timing);

    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let response = next.run(req).await;

    info!(
        request_id = %timing.request_id,
        %method,
        path,
        status = response.status().as_u16(),
        "Request processing time: {:.5} seconds",
        timing.elapsed().as_secs_f64()
    );

    response
}
