use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::handler::Handler;
use crate::http::{Request, Response};
use crate::state::AppState;

/// GET /media/{filename}: serve a file from the media bucket.
///
/// The name is validated inside the storage layer before any
/// filesystem access happens.
pub struct MediaView {
	state: Arc<AppState>,
}

impl MediaView {
	pub fn new(state: Arc<AppState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl Handler for MediaView {
	async fn handle(&self, request: Request) -> Result<Response> {
		let file_name = request
			.path_param("filename")
			.ok_or_else(|| Error::BadRequest("missing file name".into()))?
			.to_string();

		let (data, content_type) = self.state.media.open(&file_name).await?;
		Ok(Response::ok()
			.with_header("content-type", content_type)
			.with_header("cache-control", "public, max-age=31536000, immutable")
			.with_body(data))
	}
}
