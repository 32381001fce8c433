use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::fallback;
use crate::handler::Handler;
use crate::http::{Request, Response};
use crate::models::SiteContent;
use crate::pages;
use crate::state::AppState;

/// The public portfolio page.
///
/// Content comes from the datastore when one is configured and
/// answers within the fetch budget; otherwise the placeholder content
/// is rendered instead. Visitors never see a datastore error.
pub struct HomeView {
	state: Arc<AppState>,
}

impl HomeView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}

	async fn load_content(&self) -> SiteContent {
		let Some(store) = &self.state.store else {
			return fallback::site_content();
		};

		let fetch = store.fetch_site();
		match tokio::time::timeout(self.state.settings.fetch_timeout, fetch).await {
			Ok(Ok(content)) => content,
			Ok(Err(error)) => {
				tracing::warn!(%error, "site fetch failed, serving placeholder content");
				fallback::site_content()
			}
			Err(_) => {
				tracing::warn!("site fetch timed out, serving placeholder content");
				fallback::site_content()
			}
		}
	}

	/// Render the page for a contact-form failure; bypasses the cache
	pub async fn render_with_contact_error(&self, error: &str) -> Result<Response> {
		let content = self.load_content().await;
		let html = pages::render_home(&content, false, Some(error))?;
		Ok(Response::new(hyper::StatusCode::UNPROCESSABLE_ENTITY).with_html(html))
	}
}

#[async_trait]
impl Handler for HomeView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let sent = request.query_param("sent").as_deref() == Some("1");

		// Only the plain page is cached; the post-submission variant
		// carries a one-off notice.
		if !sent {
			if let Some(html) = self.state.page_cache.get() {
				return Ok(Response::ok().with_html(html));
			}
		}

		let content = self.load_content().await;
		let html = pages::render_home(&content, sent, None)?;
		if !sent {
			self.state.page_cache.put(&html);
		}
		Ok(Response::ok().with_html(html))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn renders_placeholder_without_a_store() {
		let state = AppState::for_tests("op@example.com", "pw").await.unwrap();
		let mut inner = Arc::try_unwrap(state).unwrap_or_else(|_| panic!("state is shared"));
		inner.store = None;

		let view = HomeView::new(Arc::new(inner));
		let response = view
			.handle(Request::builder().uri("/").build())
			.await
			.unwrap();
		let html = String::from_utf8(response.body.to_vec()).unwrap();
		assert!(html.contains("E-Commerce Dashboard"));
	}

	#[tokio::test]
	async fn renders_live_content_from_the_store() {
		let state = AppState::for_tests("op@example.com", "pw").await.unwrap();
		state
			.require_store()
			.unwrap()
			.insert_project(crate::forms::ProjectPayload {
				title: "Signal Mesh".into(),
				description: "Sensor network dashboard".into(),
				technologies: vec!["rust".into()],
				image_url: None,
				demo_url: None,
				repo_url: None,
			})
			.await
			.unwrap();

		let view = HomeView::new(state);
		let response = view
			.handle(Request::builder().uri("/").build())
			.await
			.unwrap();
		let html = String::from_utf8(response.body.to_vec()).unwrap();
		assert!(html.contains("Signal Mesh"));
	}

	#[tokio::test]
	async fn fetch_exceeding_the_timeout_serves_placeholder_content() {
		let state = AppState::for_tests("op@example.com", "pw").await.unwrap();
		let mut inner = Arc::try_unwrap(state).unwrap_or_else(|_| panic!("state is shared"));
		inner.settings.fetch_timeout = std::time::Duration::ZERO;
		let state = Arc::new(inner);

		state
			.require_store()
			.unwrap()
			.insert_project(crate::forms::ProjectPayload {
				title: "Signal Mesh".into(),
				description: "Sensor network dashboard".into(),
				technologies: vec![],
				image_url: None,
				demo_url: None,
				repo_url: None,
			})
			.await
			.unwrap();

		let view = HomeView::new(state);
		let response = view
			.handle(Request::builder().uri("/").build())
			.await
			.unwrap();
		let html = String::from_utf8(response.body.to_vec()).unwrap();
		assert!(html.contains("E-Commerce Dashboard"));
		assert!(!html.contains("Signal Mesh"));
	}

	#[tokio::test]
	async fn datastore_errors_serve_placeholder_content() {
		// A store whose schema is broken fails every fetch.
		let db = crate::db::Database::in_memory().await.unwrap();
		sqlx::raw_sql("DROP TABLE projects")
			.execute(db.pool())
			.await
			.unwrap();

		let state = AppState::for_tests("op@example.com", "pw").await.unwrap();
		let mut inner = Arc::try_unwrap(state).unwrap_or_else(|_| panic!("state is shared"));
		inner.store = Some(crate::store::PortfolioStore::new(db, inner.feed.clone()));

		let view = HomeView::new(Arc::new(inner));
		let response = view
			.handle(Request::builder().uri("/").build())
			.await
			.unwrap();
		assert_eq!(response.status, hyper::StatusCode::OK);
		let html = String::from_utf8(response.body.to_vec()).unwrap();
		assert!(html.contains("E-Commerce Dashboard"));
	}

	#[tokio::test]
	async fn sent_flag_shows_the_thank_you_note() {
		let state = AppState::for_tests("op@example.com", "pw").await.unwrap();
		let view = HomeView::new(state);
		let response = view
			.handle(Request::builder().uri("/?sent=1").build())
			.await
			.unwrap();
		let html = String::from_utf8(response.body.to_vec()).unwrap();
		assert!(html.contains("Thanks for reaching out"));
	}
}
