use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::net::SocketAddr;

use crate::error::{Error, Result};

/// HTTP request representation handed to view handlers.
///
/// The server collects the body up front, so handlers work with plain
/// [`Bytes`] instead of a streaming body. Path parameters captured by the
/// router are stashed on the request before dispatch.
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub remote_addr: Option<SocketAddr>,
	path_params: HashMap<String, String>,
}

impl Request {
	/// Create a new request from its parts
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
			remote_addr: None,
			path_params: HashMap::new(),
		}
	}

	/// Start building a request; mostly useful in tests
	///
	/// # Examples
	///
	/// ```
	/// use folio::http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/projects/42/")
	///     .build();
	/// assert_eq!(request.path(), "/projects/42/");
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::new()
	}

	/// Request path without the query string
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Query parameters decoded from the URI
	///
	/// # Examples
	///
	/// ```
	/// use folio::http::Request;
	///
	/// let request = Request::builder().uri("/?sent=1&tab=hero").build();
	/// assert_eq!(request.query_param("sent").as_deref(), Some("1"));
	/// assert_eq!(request.query_param("missing"), None);
	/// ```
	pub fn query_params(&self) -> HashMap<String, String> {
		self.uri
			.query()
			.and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
			.map(|pairs| pairs.into_iter().collect())
			.unwrap_or_default()
	}

	/// Single query parameter by name
	pub fn query_param(&self, name: &str) -> Option<String> {
		self.query_params().remove(name)
	}

	/// Body decoded as `application/x-www-form-urlencoded` pairs
	pub fn form_params(&self) -> Result<HashMap<String, String>> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&self.body)
			.map_err(|e| Error::BadRequest(format!("invalid form body: {}", e)))?;
		Ok(pairs.into_iter().collect())
	}

	/// Body decoded as a typed urlencoded form
	pub fn form<T: DeserializeOwned>(&self) -> Result<T> {
		serde_urlencoded::from_bytes(&self.body)
			.map_err(|e| Error::BadRequest(format!("invalid form body: {}", e)))
	}

	/// Body decoded as JSON
	pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
		serde_json::from_slice(&self.body)
			.map_err(|e| Error::BadRequest(format!("invalid JSON body: {}", e)))
	}

	/// Content-Type header value, if present
	pub fn content_type(&self) -> Option<&str> {
		self.headers
			.get(hyper::header::CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
	}

	/// Cookie value by name
	///
	/// # Examples
	///
	/// ```
	/// use folio::http::Request;
	///
	/// let request = Request::builder()
	///     .uri("/admin")
	///     .header("cookie", "sid=abc123; theme=dark")
	///     .build();
	/// assert_eq!(request.cookie("sid").as_deref(), Some("abc123"));
	/// assert_eq!(request.cookie("theme").as_deref(), Some("dark"));
	/// assert_eq!(request.cookie("nope"), None);
	/// ```
	pub fn cookie(&self, name: &str) -> Option<String> {
		let header = self.headers.get(hyper::header::COOKIE)?.to_str().ok()?;
		for pair in header.split(';') {
			let mut parts = pair.trim().splitn(2, '=');
			if parts.next() == Some(name) {
				return parts.next().map(|v| v.to_string());
			}
		}
		None
	}

	/// Path parameter captured by the router
	pub fn path_param(&self, name: &str) -> Option<&str> {
		self.path_params.get(name).map(|s| s.as_str())
	}

	/// Replace the captured path parameters (called by the router)
	pub fn set_path_params(&mut self, params: HashMap<String, String>) {
		self.path_params = params;
	}
}

/// Builder for [`Request`]
pub struct RequestBuilder {
	method: Method,
	uri: Uri,
	version: Version,
	headers: HeaderMap,
	body: Bytes,
}

impl RequestBuilder {
	pub fn new() -> Self {
		Self {
			method: Method::GET,
			uri: Uri::from_static("/"),
			version: Version::HTTP_11,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: &str) -> Self {
		self.uri = uri.parse().expect("invalid test URI");
		self
	}

	pub fn header(mut self, name: &'static str, value: &str) -> Self {
		if let Ok(value) = hyper::header::HeaderValue::from_str(value) {
			self.headers
				.insert(hyper::header::HeaderName::from_static(name), value);
		}
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Urlencoded form body with the matching Content-Type
	pub fn form_body(self, pairs: &[(&str, &str)]) -> Self {
		let encoded = serde_urlencoded::to_string(pairs).expect("form encoding");
		self.header("content-type", "application/x-www-form-urlencoded")
			.body(encoded)
	}

	/// JSON body with the matching Content-Type
	pub fn json_body<T: serde::Serialize>(self, value: &T) -> Self {
		let encoded = serde_json::to_vec(value).expect("json encoding");
		self.header("content-type", "application/json").body(encoded)
	}

	pub fn build(self) -> Request {
		Request::new(self.method, self.uri, self.version, self.headers, self.body)
	}
}

impl Default for RequestBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn form_params_decode_urlencoded_bodies() {
		let request = Request::builder()
			.method(Method::POST)
			.uri("/contact")
			.form_body(&[("name", "Ada"), ("email", "ada@example.com")])
			.build();

		let params = request.form_params().unwrap();
		assert_eq!(params.get("name").map(|s| s.as_str()), Some("Ada"));
		assert_eq!(
			params.get("email").map(|s| s.as_str()),
			Some("ada@example.com")
		);
	}

	#[test]
	fn json_body_round_trips() {
		#[derive(serde::Serialize, serde::Deserialize)]
		struct Payload {
			name: String,
		}

		let request = Request::builder()
			.method(Method::POST)
			.json_body(&Payload { name: "Rust".into() })
			.build();

		let decoded: Payload = request.json().unwrap();
		assert_eq!(decoded.name, "Rust");
	}

	#[test]
	fn invalid_json_is_a_bad_request() {
		let request = Request::builder()
			.method(Method::POST)
			.body("{not json")
			.build();

		let err = request.json::<serde_json::Value>().unwrap_err();
		assert_eq!(err.status_code(), 400);
	}

	#[test]
	fn path_params_are_stashed_on_the_request() {
		let mut request = Request::builder().uri("/admin/api/skills/42").build();
		let mut params = HashMap::new();
		params.insert("id".to_string(), "42".to_string());
		request.set_path_params(params);

		assert_eq!(request.path_param("id"), Some("42"));
		assert_eq!(request.path_param("table"), None);
	}
}
