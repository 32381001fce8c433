use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::forms::{validate_payload, ContactForm};
use crate::handler::Handler;
use crate::http::{Request, Response};
use crate::state::AppState;
use crate::views::public::HomeView;

/// Handles the public contact form.
///
/// Valid submissions are stored and redirect back to the page with a
/// thank-you note; invalid ones re-render the page with the message
/// inline so nothing the visitor typed elsewhere is lost to a dead
/// error page.
pub struct ContactView {
	state: Arc<AppState>,
}

impl ContactView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ContactView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let form: ContactForm = request.form()?;

		match validate_payload(&form) {
			Ok(()) => {}
			Err(Error::Validation(message)) => {
				let home = HomeView::new(self.state.clone());
				return home.render_with_contact_error(&message).await;
			}
			Err(other) => return Err(other),
		}

		if let Some(store) = &self.state.store {
			store.insert_message(form).await?;
		} else {
			// Fallback mode accepts the form so the page flow still
			// works, but there is nowhere to keep the message.
			tracing::warn!("contact submission discarded, no datastore configured");
		}

		Ok(Response::see_other("/?sent=1#contact"))
	}
}
