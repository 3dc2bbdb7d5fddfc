//! Health endpoints: orchestration probes plus the public healthcheck.
//! Every answer carries `Cache-Control: no-store`.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, HttpResponseBuilder, get, http::header, web};

/// Readiness and liveness flags shared with the server bootstrap.
///
/// Starts live but not ready; `main` flips readiness once the listener is
/// bound and liveness off once the server stops.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn uncached(mut builder: HttpResponseBuilder) -> HttpResponse {
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

fn probe(passing: bool) -> HttpResponse {
    uncached(if passing {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    })
}

/// Readiness probe. 503 until startup completes.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready())
}

/// Liveness probe. 503 once the server is draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive())
}

/// Public healthcheck used by uptime monitors.
#[utoipa::path(
    get,
    path = "/api/public/healthcheck",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Service is up"))
)]
#[get("/healthcheck")]
pub async fn healthcheck() -> HttpResponse {
    uncached(HttpResponse::Ok())
}
