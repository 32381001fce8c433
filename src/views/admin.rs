use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::BroadcastStream;

use crate::error::{Error, Result};
use crate::forms::{
	validate_payload, AboutPayload, ContactSettingsPayload, ExperiencePayload, HeroSavePayload,
	ProjectPayload, SkillPayload,
};
use crate::handler::Handler;
use crate::http::{EventStream, Request, Response};
use crate::multipart;
use crate::pages;
use crate::state::AppState;

/// GET /admin: the dashboard shell; data arrives over the JSON API
pub struct AdminPanelView;

#[async_trait]
impl Handler for AdminPanelView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		Ok(Response::ok().with_html(pages::render_admin()?))
	}
}

/// GET /admin/api/data: everything the dashboard renders, in one fetch
pub struct AdminDataView {
	state: Arc<AppState>,
}

impl AdminDataView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for AdminDataView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		let data = self.state.require_store()?.fetch_admin().await?;
		Response::ok().with_json(&data)
	}
}

/// POST /admin/api/skills
pub struct SkillCreateView {
	state: Arc<AppState>,
}

impl SkillCreateView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for SkillCreateView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let payload: SkillPayload = request.json()?;
		validate_payload(&payload)?;
		let skill = self.state.require_store()?.insert_skill(payload).await?;
		Response::created().with_json(&skill)
	}
}

/// POST /admin/api/projects
pub struct ProjectCreateView {
	state: Arc<AppState>,
}

impl ProjectCreateView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ProjectCreateView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let payload: ProjectPayload = request.json()?;
		validate_payload(&payload)?;
		let project = self.state.require_store()?.insert_project(payload).await?;
		Response::created().with_json(&project)
	}
}

/// POST /admin/api/experience
pub struct ExperienceCreateView {
	state: Arc<AppState>,
}

impl ExperienceCreateView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ExperienceCreateView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let payload: ExperiencePayload = request.json()?;
		validate_payload(&payload)?;
		let entry = self.state.require_store()?.insert_experience(payload).await?;
		Response::created().with_json(&entry)
	}
}

/// DELETE /admin/api/{table}/{id}
pub struct AdminDeleteView {
	state: Arc<AppState>,
}

impl AdminDeleteView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for AdminDeleteView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let table = request
			.path_param("table")
			.ok_or_else(|| Error::BadRequest("missing table".into()))?
			.to_string();
		let id = request
			.path_param("id")
			.ok_or_else(|| Error::BadRequest("missing id".into()))?
			.to_string();

		self.state.require_store()?.delete_row(&table, &id).await?;
		Ok(Response::no_content())
	}
}

/// PUT /admin/api/hero: saves the hero card, which writes both the
/// hero and contact settings singletons
pub struct HeroSaveView {
	state: Arc<AppState>,
}

impl HeroSaveView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for HeroSaveView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let payload: HeroSavePayload = request.json()?;
		validate_payload(&payload)?;
		let (hero, contact) = self
			.state
			.require_store()?
			.save_hero(payload.hero, payload.contact)
			.await?;
		Response::ok().with_json(&serde_json::json!({ "hero": hero, "contact": contact }))
	}
}

/// PUT /admin/api/contact: updates only the contact settings singleton
pub struct ContactSaveView {
	state: Arc<AppState>,
}

impl ContactSaveView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for ContactSaveView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let payload: ContactSettingsPayload = request.json()?;
		validate_payload(&payload)?;
		let contact = self
			.state
			.require_store()?
			.upsert_contact_settings(payload)
			.await?;
		Response::ok().with_json(&contact)
	}
}

/// PUT /admin/api/about
pub struct AboutSaveView {
	state: Arc<AppState>,
}

impl AboutSaveView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for AboutSaveView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let payload: AboutPayload = request.json()?;
		validate_payload(&payload)?;
		let about = self.state.require_store()?.upsert_about(payload).await?;
		Response::ok().with_json(&about)
	}
}

/// GET /admin/api/events: server-sent change notifications.
///
/// Subscribers that lag behind the broadcast capacity silently miss
/// events; the dashboard refetches on whatever it sees next.
pub struct EventsView {
	state: Arc<AppState>,
}

impl EventsView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for EventsView {
	async fn handle(&self, _request: Request) -> Result<Response> {
		let receiver = self.state.feed.subscribe();

		let changes = BroadcastStream::new(receiver).filter_map(|item| async move {
			match item {
				Ok(change) => Some(Ok::<_, Infallible>(Bytes::from(change.sse_event()))),
				// Lagged subscribers skip ahead rather than erroring.
				Err(_) => None,
			}
		});
		let opening = futures::stream::once(async { Ok(Bytes::from_static(b": connected\n\n")) });
		let stream: EventStream = Box::pin(opening.chain(changes));

		Ok(Response::ok().with_event_stream(stream))
	}
}

/// POST /admin/api/upload: store a file in the media bucket
pub struct UploadView {
	state: Arc<AppState>,
}

impl UploadView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for UploadView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let content_type = request
			.content_type()
			.ok_or_else(|| Error::BadRequest("missing content type".into()))?;
		let boundary = multipart::boundary(content_type)?;
		let parts = multipart::parse(&request.body, &boundary)?;

		let file = parts
			.into_iter()
			.find(|part| part.name == "file" && part.file_name.is_some())
			.ok_or_else(|| Error::BadRequest("missing file part".into()))?;
		let original_name = file
			.file_name
			.as_deref()
			.ok_or_else(|| Error::BadRequest("missing file name".into()))?;

		let stored = self.state.media.store(original_name, &file.data).await?;
		tracing::info!(file = %stored.file_name, size = stored.size, "stored upload");
		Response::created().with_json(&stored)
	}
}
