use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::{clear_session_cookie, session_cookie, SESSION_COOKIE};
use crate::error::Result;
use crate::forms::LoginForm;
use crate::handler::Handler;
use crate::http::{Request, Response};
use crate::pages;
use crate::state::AppState;

/// GET /login: the sign-in form
pub struct LoginFormView;

#[async_trait]
impl Handler for LoginFormView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		Ok(Response::ok().with_html(pages::render_login(None)?))
	}
}

/// POST /login: verify the operator credential and open a session.
///
/// Failures re-render the form with one deliberately vague message;
/// whether the email or the password was wrong is not disclosed.
pub struct LoginView {
	state: Arc<AppState>,
}

impl LoginView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for LoginView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let form: LoginForm = request.form()?;

		let verified = self
			.state
			.credentials
			.as_ref()
			.map(|creds| creds.verify(&form.email, &form.password))
			.unwrap_or(false);

		if !verified {
			tracing::info!(email = %form.email, "rejected login attempt");
			let html = pages::render_login(Some("Invalid email or password"))?;
			return Ok(Response::unauthorized().with_html(html));
		}

		let token = self.state.sessions.create();
		tracing::info!("operator signed in");
		Ok(Response::see_other("/admin")
			.with_cookie(&session_cookie(&token, self.state.settings.session_ttl)))
	}
}

/// POST /logout: revoke the session and clear the cookie
pub struct LogoutView {
	state: Arc<AppState>,
}

impl LogoutView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for LogoutView {
	async fn handle(&self, request: Request) -> Result<Response> {
		if let Some(token) = request.cookie(SESSION_COOKIE) {
			self.state.sessions.revoke(&token);
		}
		Ok(Response::see_other("/login").with_cookie(&clear_session_cookie()))
	}
}
