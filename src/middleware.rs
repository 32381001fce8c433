use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use crate::auth::SESSION_COOKIE;
use crate::error::Result;
use crate::handler::{Handler, Middleware};
use crate::http::{Request, Response};
use crate::state::AppState;

/// Logs one line per request with method, path, status and latency
pub struct RequestLogger;

#[async_trait]
impl Middleware for RequestLogger {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let method = request.method.clone();
		let path = request.path().to_string();
		let started = Instant::now();

		let result = next.handle(request).await;
		let elapsed = started.elapsed();

		match &result {
			Ok(response) => {
				tracing::info!(
					method = %method,
					path = %path,
					status = response.status.as_u16(),
					elapsed_ms = elapsed.as_millis() as u64,
					"request"
				);
			}
			Err(error) => {
				tracing::warn!(
					method = %method,
					path = %path,
					status = error.status_code(),
					elapsed_ms = elapsed.as_millis() as u64,
					error = %error,
					"request failed"
				);
			}
		}

		result
	}
}

/// Guards the admin panel and its API behind a valid session.
///
/// Browser page requests are redirected to the login form; API
/// requests get a 401 JSON body the dashboard script understands.
pub struct AdminGuard {
	state: Arc<AppState>,
}

impl AdminGuard {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}

	fn has_valid_session(&self, request: &Request) -> bool {
		request
			.cookie(SESSION_COOKIE)
			.map(|token| self.state.sessions.is_valid(&token))
			.unwrap_or(false)
	}
}

#[async_trait]
impl Middleware for AdminGuard {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		if self.has_valid_session(&request) {
			return next.handle(request).await;
		}

		if request.path().starts_with("/admin/api") {
			Ok(Response::unauthorized()
				.with_json(&serde_json::json!({"error": "authentication required"}))?)
		} else {
			Ok(Response::temporary_redirect("/login"))
		}
	}

	fn should_continue(&self, request: &Request) -> bool {
		request.path().starts_with("/admin")
	}
}
