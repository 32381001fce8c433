use bytes::Bytes;
use futures::stream::Stream;
use hyper::{HeaderMap, StatusCode};
use serde::Serialize;
use std::convert::Infallible;
use std::pin::Pin;

use crate::error::Error;

/// Body stream type for server-push responses (SSE)
pub type EventStream = Pin<Box<dyn Stream<Item = Result<Bytes, Infallible>> + Send + 'static>>;

/// HTTP response representation.
///
/// Most responses carry a buffered body; server-push endpoints attach an
/// [`EventStream`] instead, which the server forwards frame by frame.
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
	stream: Option<EventStream>,
}

impl Response {
	/// Create a response with the given status code
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
			stream: None,
		}
	}

	/// 200 OK
	///
	/// # Examples
	///
	/// ```
	/// use folio::http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::ok();
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// 201 Created
	pub fn created() -> Self {
		Self::new(StatusCode::CREATED)
	}

	/// 204 No Content
	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	/// 400 Bad Request
	pub fn bad_request() -> Self {
		Self::new(StatusCode::BAD_REQUEST)
	}

	/// 401 Unauthorized
	pub fn unauthorized() -> Self {
		Self::new(StatusCode::UNAUTHORIZED)
	}

	/// 404 Not Found
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// 405 Method Not Allowed
	pub fn method_not_allowed() -> Self {
		Self::new(StatusCode::METHOD_NOT_ALLOWED)
	}

	/// 500 Internal Server Error
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// 302 Found (temporary redirect)
	///
	/// # Examples
	///
	/// ```
	/// use folio::http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::temporary_redirect("/login");
	/// assert_eq!(response.status, StatusCode::FOUND);
	/// assert_eq!(
	///     response.headers.get("location").unwrap().to_str().unwrap(),
	///     "/login"
	/// );
	/// ```
	pub fn temporary_redirect(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::FOUND).with_location(location.as_ref())
	}

	/// 303 See Other (redirect after a form POST)
	pub fn see_other(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::SEE_OTHER).with_location(location.as_ref())
	}

	/// Set the response body
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a header to the response
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = hyper::header::HeaderName::from_bytes(name.as_bytes()) {
			if let Ok(header_value) = hyper::header::HeaderValue::from_str(value) {
				self.headers.append(header_name, header_value);
			}
		}
		self
	}

	/// Add a Location header (used by the redirect constructors)
	pub fn with_location(mut self, location: &str) -> Self {
		if let Ok(value) = hyper::header::HeaderValue::from_str(location) {
			self.headers.insert(hyper::header::LOCATION, value);
		}
		self
	}

	/// Serialize `data` as the JSON body and set the Content-Type
	///
	/// # Examples
	///
	/// ```
	/// use folio::http::Response;
	/// use serde_json::json;
	///
	/// let response = Response::ok().with_json(&json!({"ok": true})).unwrap();
	/// assert_eq!(
	///     response.headers.get("content-type").unwrap().to_str().unwrap(),
	///     "application/json"
	/// );
	/// ```
	pub fn with_json<T: Serialize>(mut self, data: &T) -> crate::error::Result<Self> {
		let json = serde_json::to_vec(data).map_err(|e| Error::Serialization(e.to_string()))?;
		self.body = Bytes::from(json);
		self.headers.insert(
			hyper::header::CONTENT_TYPE,
			hyper::header::HeaderValue::from_static("application/json"),
		);
		Ok(self)
	}

	/// Set an HTML body with the matching Content-Type
	pub fn with_html(mut self, html: impl Into<Bytes>) -> Self {
		self.body = html.into();
		self.headers.insert(
			hyper::header::CONTENT_TYPE,
			hyper::header::HeaderValue::from_static("text/html; charset=utf-8"),
		);
		self
	}

	/// Append a Set-Cookie header
	pub fn with_cookie(self, cookie: &str) -> Self {
		self.with_header("set-cookie", cookie)
	}

	/// Attach a server-push event stream and the SSE headers
	pub fn with_event_stream(mut self, stream: EventStream) -> Self {
		self.stream = Some(stream);
		self.headers.insert(
			hyper::header::CONTENT_TYPE,
			hyper::header::HeaderValue::from_static("text/event-stream"),
		);
		self.headers.insert(
			hyper::header::CACHE_CONTROL,
			hyper::header::HeaderValue::from_static("no-cache"),
		);
		self
	}

	/// Whether this response carries a streamed body
	pub fn is_streaming(&self) -> bool {
		self.stream.is_some()
	}

	/// Take the event stream out of the response (used by the server)
	pub fn take_stream(&mut self) -> Option<EventStream> {
		self.stream.take()
	}
}

impl std::fmt::Debug for Response {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Response")
			.field("status", &self.status)
			.field("headers", &self.headers)
			.field("body_len", &self.body.len())
			.field("streaming", &self.is_streaming())
			.finish()
	}
}

impl From<Error> for Response {
	fn from(error: Error) -> Self {
		let body = serde_json::json!({ "error": error.to_string() });
		Response::new(error.status())
			.with_json(&body)
			.unwrap_or_else(|_| Response::internal_server_error())
	}
}
