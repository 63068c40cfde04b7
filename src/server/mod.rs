//! HTTP service surface.
//!
//! One tokio task per connection, one request per connection. Routing is a
//! match over method and path; everything unknown gets a 404 envelope.

mod http;

use std::sync::Arc;
use std::time::Instant;

use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

use crate::engine::LintEngine;
use crate::error::Result;
use crate::schema::{HealthReport, LintReport, LintRequest};
use crate::service::LintService;

use self::http::{read_request, write_response, HttpRequest, HttpResponse};

/// Shared server state; read-only after startup.
pub struct AppState<E> {
    pub service: LintService<E>,
    started: Instant,
    environment: String,
}

impl<E: LintEngine> AppState<E> {
    pub fn new(service: LintService<E>) -> Self {
        let environment =
            std::env::var("STYLEFIX_ENV").unwrap_or_else(|_| "development".to_string());
        Self {
            service,
            started: Instant::now(),
            environment,
        }
    }

    fn health(&self) -> HealthReport {
        HealthReport {
            status: "ok",
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime: self.started.elapsed().as_secs_f64(),
            environment: self.environment.clone(),
        }
    }

    fn banner(&self) -> String {
        format!(
            "stylefix {} (stylelint {})\nPOST /lint to lint CSS, GET /health for status\n",
            env!("CARGO_PKG_VERSION"),
            self.service.version()
        )
    }
}

/// Accept connections until the listener fails.
pub async fn serve<E>(listener: TcpListener, state: Arc<AppState<E>>) -> Result<()>
where
    E: LintEngine + 'static,
{
    tracing::info!("listening on http://{}", listener.local_addr()?);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tracing::debug!("accepted connection from {}", addr);
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    handle_connection(stream, state).await;
                });
            }
            Err(e) => {
                tracing::error!("failed to accept connection: {}", e);
            }
        }
    }
}

async fn handle_connection<E: LintEngine>(stream: TcpStream, state: Arc<AppState<E>>) {
    let request_id = uuid::Uuid::new_v4();
    let mut stream = BufReader::new(stream);

    let request = match read_request(&mut stream).await {
        Ok(Some(request)) => request,
        Ok(None) => return,
        Err(e) => {
            tracing::debug!(%request_id, "unreadable request: {}", e);
            let response = HttpResponse::json(400, failure_body("malformed HTTP request"));
            let _ = write_response(&mut stream, &response).await;
            return;
        }
    };

    tracing::info!(%request_id, method = %request.method, path = %request.path, "request");
    let response = route(&request, &state).await;
    tracing::info!(%request_id, status = response.status, "response");

    if let Err(e) = write_response(&mut stream, &response).await {
        tracing::debug!(%request_id, "failed to write response: {}", e);
    }
}

async fn route<E: LintEngine>(request: &HttpRequest, state: &AppState<E>) -> HttpResponse {
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/") => HttpResponse::text(200, state.banner()),
        ("GET", "/health") => json_response(200, &state.health()),
        ("POST", "/lint") => lint(request, state).await,
        _ => HttpResponse::json(404, failure_body("not found")),
    }
}

async fn lint<E: LintEngine>(request: &HttpRequest, state: &AppState<E>) -> HttpResponse {
    let lint_request: LintRequest = match serde_json::from_slice(&request.body) {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::json(400, failure_body(&format!("invalid request body: {}", e)));
        }
    };

    match state.service.run(&lint_request).await {
        Ok(report) => json_response(200, &report),
        Err(err) => HttpResponse::json(err.http_status(), failure_body(&err.to_string())),
    }
}

fn json_response<T: serde::Serialize>(status: u16, payload: &T) -> HttpResponse {
    match serde_json::to_string(payload) {
        Ok(body) => HttpResponse::json(status, body),
        Err(e) => HttpResponse::json(500, failure_body(&format!("serialization failed: {}", e))),
    }
}

fn failure_body(message: &str) -> String {
    serde_json::to_string(&LintReport::failure(message))
        .unwrap_or_else(|_| r#"{"success":false,"message":"internal error","content":null}"#.to_string())
}
