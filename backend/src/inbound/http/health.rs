//! Liveness and readiness probes for orchestrators and load balancers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

/// External dependency consulted by the readiness probe.
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    /// Short label used in logs and probe bodies.
    fn name(&self) -> &'static str;

    /// `Ok` when the dependency can serve requests.
    async fn check(&self) -> Result<(), String>;
}

/// Probe flags plus the dependencies readiness depends on.
///
/// Starts live but not ready; the server marks it ready once bound.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    dependencies: Vec<Arc<dyn DependencyCheck>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            dependencies: Vec::new(),
        }
    }
}

impl HealthState {
    /// Not ready, alive, with no dependency checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `dependency` to pass before readiness reports success.
    #[must_use]
    pub fn with_dependency(mut self, dependency: Arc<dyn DependencyCheck>) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Flip readiness on once the server is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether [`HealthState::mark_ready`] has run.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// False after [`HealthState::mark_unhealthy`].
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    async fn failing_dependency(&self) -> Option<&'static str> {
        for dependency in &self.dependencies {
            if let Err(reason) = dependency.check().await {
                warn!(dependency = dependency.name(), %reason, "readiness check failed");
                return Some(dependency.name());
            }
        }
        None
    }
}

/// JSON body returned by both probes.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProbeBody {
    /// `ok` or `unavailable`.
    status: &'static str,
    /// Dependency that failed the probe, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_dependency: Option<&'static str>,
}

fn probe_response(failed_dependency: Option<&'static str>, ok: bool) -> HttpResponse {
    let (mut response, status) = if ok && failed_dependency.is_none() {
        (HttpResponse::Ok(), "ok")
    } else {
        (HttpResponse::ServiceUnavailable(), "unavailable")
    };

    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeBody {
            status,
            failed_dependency,
        })
}

/// Readiness probe: 200 once started and every dependency check passes.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = ProbeBody),
        (status = 503, description = "Server or a dependency is not ready", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    if !state.is_ready() {
        return probe_response(None, false);
    }
    let failed = state.failing_dependency().await;
    probe_response(failed, true)
}

/// Liveness probe: 200 until [`HealthState::mark_unhealthy`] is called.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive", body = ProbeBody),
        (status = 503, description = "Server is shutting down", body = ProbeBody)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(None, state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    struct StaticCheck(Result<(), String>);

    #[async_trait]
    impl DependencyCheck for StaticCheck {
        fn name(&self) -> &'static str {
            "database"
        }

        async fn check(&self) -> Result<(), String> {
            self.0.clone()
        }
    }

    async fn probe(state: HealthState, uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(ready)
                .service(live),
        )
        .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        let status = res.status();
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        (status, actix_test::read_body_json(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn not_ready_until_marked() {
        let (status, body) = probe(HealthState::new(), "/health/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unavailable");
    }

    #[rstest]
    #[case(Ok(()), StatusCode::OK)]
    #[case(Err("refused".to_owned()), StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn readiness_consults_dependencies(
        #[case] outcome: Result<(), String>,
        #[case] expected: StatusCode,
    ) {
        let state = HealthState::new().with_dependency(Arc::new(StaticCheck(outcome)));
        state.mark_ready();

        let (status, body) = probe(state, "/health/ready").await;

        assert_eq!(status, expected);
        if expected != StatusCode::OK {
            assert_eq!(body["failedDependency"], "database");
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_after_mark_unhealthy() {
        let state = HealthState::new();
        state.mark_unhealthy();

        let (status, _) = probe(state, "/health/live").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
