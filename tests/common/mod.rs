#![allow(dead_code)]

use std::sync::Arc;

use folio::handler::Handler;
use folio::http::{Request, Response};
use folio::urls;
use folio::AppState;
use hyper::Method;

pub const ADMIN_EMAIL: &str = "op@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// The composed application plus its state, backed by an in-memory
/// database and a temporary media directory.
pub struct TestApp {
	pub state: Arc<AppState>,
	pub app: Arc<dyn Handler>,
}

impl TestApp {
	pub async fn new() -> Self {
		let state = AppState::for_tests(ADMIN_EMAIL, ADMIN_PASSWORD)
			.await
			.expect("test state");
		let app = urls::application(state.clone());
		Self { state, app }
	}

	pub async fn request(&self, request: Request) -> Response {
		match self.app.handle(request).await {
			Ok(response) => response,
			Err(error) => Response::from(error),
		}
	}

	/// Log in and return the session cookie pair (`sid=...`)
	pub async fn login(&self) -> String {
		let response = self
			.request(
				Request::builder()
					.method(Method::POST)
					.uri("/login")
					.form_body(&[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
					.build(),
			)
			.await;
		assert_eq!(response.status, hyper::StatusCode::SEE_OTHER, "login failed");

		let cookie = response
			.headers
			.get("set-cookie")
			.expect("session cookie")
			.to_str()
			.expect("cookie encoding");
		cookie
			.split(';')
			.next()
			.expect("cookie pair")
			.to_string()
	}
}

pub fn body_string(response: &Response) -> String {
	String::from_utf8(response.body.to_vec()).expect("utf-8 body")
}

pub fn body_json(response: &Response) -> serde_json::Value {
	serde_json::from_slice(&response.body).expect("json body")
}
