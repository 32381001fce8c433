use async_trait::async_trait;
use hyper::Method;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::handler::Handler;
use crate::http::{Request, Response};

/// A single route: method, path pattern, and the handler to dispatch to.
pub struct Route {
	pub method: Method,
	pub pattern: PathPattern,
	pub handler: Arc<dyn Handler>,
}

impl Route {
	pub fn new(method: Method, pattern: &str, handler: Arc<dyn Handler>) -> Self {
		Self {
			method,
			pattern: PathPattern::new(pattern),
			handler,
		}
	}
}

/// Path pattern with `{param}` placeholders.
///
/// Each segment either matches literally or captures into a named
/// parameter. Trailing slashes are normalized away on both sides.
///
/// # Examples
///
/// ```
/// use folio::routing::PathPattern;
///
/// let pattern = PathPattern::new("/admin/api/{table}/{id}");
/// let params = pattern.matches("/admin/api/skills/42").unwrap();
/// assert_eq!(params.get("table").map(|s| s.as_str()), Some("skills"));
/// assert_eq!(params.get("id").map(|s| s.as_str()), Some("42"));
/// assert!(pattern.matches("/admin/api/skills").is_none());
/// ```
pub struct PathPattern {
	segments: Vec<Segment>,
}

enum Segment {
	Literal(String),
	Param(String),
}

impl PathPattern {
	pub fn new(pattern: &str) -> Self {
		let segments = pattern
			.split('/')
			.filter(|s| !s.is_empty())
			.map(|s| {
				if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
					Segment::Param(name.to_string())
				} else {
					Segment::Literal(s.to_string())
				}
			})
			.collect();
		Self { segments }
	}

	/// Match a request path, returning captured parameters on success
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
		if parts.len() != self.segments.len() {
			return None;
		}

		let mut params = HashMap::new();
		for (segment, part) in self.segments.iter().zip(parts) {
			match segment {
				Segment::Literal(lit) if lit == part => {}
				Segment::Literal(_) => return None,
				Segment::Param(name) => {
					params.insert(name.clone(), part.to_string());
				}
			}
		}
		Some(params)
	}
}

/// Router dispatching requests to registered routes.
///
/// Routes are tried in registration order. A path match with the wrong
/// method yields 405; no path match at all yields 404.
pub struct UrlRouter {
	routes: Vec<Route>,
}

impl UrlRouter {
	pub fn new() -> Self {
		Self { routes: Vec::new() }
	}

	/// Register a route using the builder pattern
	pub fn route(mut self, method: Method, pattern: &str, handler: Arc<dyn Handler>) -> Self {
		self.routes.push(Route::new(method, pattern, handler));
		self
	}
}

impl Default for UrlRouter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Handler for UrlRouter {
	async fn handle(&self, mut request: Request) -> Result<Response> {
		let path = request.path().to_string();
		let mut path_matched = false;

		for route in &self.routes {
			if let Some(params) = route.pattern.matches(&path) {
				if route.method == request.method {
					request.set_path_params(params);
					return route.handler.handle(request).await;
				}
				path_matched = true;
			}
		}

		if path_matched {
			Ok(Response::method_not_allowed())
		} else {
			Ok(Response::not_found().with_html("<h1>404 Not Found</h1>"))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct NamedHandler(&'static str);

	#[async_trait]
	impl Handler for NamedHandler {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Ok(Response::ok().with_body(self.0))
		}
	}

	struct ParamEcho;

	#[async_trait]
	impl Handler for ParamEcho {
		async fn handle(&self, request: Request) -> Result<Response> {
			let table = request.path_param("table").unwrap_or("?").to_string();
			let id = request.path_param("id").unwrap_or("?").to_string();
			Ok(Response::ok().with_body(format!("{}/{}", table, id)))
		}
	}

	fn router() -> UrlRouter {
		UrlRouter::new()
			.route(Method::GET, "/", Arc::new(NamedHandler("home")))
			.route(Method::POST, "/contact", Arc::new(NamedHandler("contact")))
			.route(
				Method::DELETE,
				"/admin/api/{table}/{id}",
				Arc::new(ParamEcho),
			)
	}

	#[tokio::test]
	async fn dispatches_by_method_and_path() {
		let response = router()
			.handle(Request::builder().uri("/").build())
			.await
			.unwrap();
		assert_eq!(&response.body[..], b"home");
	}

	#[tokio::test]
	async fn captures_path_parameters() {
		let response = router()
			.handle(
				Request::builder()
					.method(Method::DELETE)
					.uri("/admin/api/skills/abc-123")
					.build(),
			)
			.await
			.unwrap();
		assert_eq!(&response.body[..], b"skills/abc-123");
	}

	#[tokio::test]
	async fn wrong_method_is_405() {
		let response = router()
			.handle(
				Request::builder()
					.method(Method::GET)
					.uri("/contact")
					.build(),
			)
			.await
			.unwrap();
		assert_eq!(response.status, hyper::StatusCode::METHOD_NOT_ALLOWED);
	}

	#[tokio::test]
	async fn unknown_path_is_404() {
		let response = router()
			.handle(Request::builder().uri("/nope").build())
			.await
			.unwrap();
		assert_eq!(response.status, hyper::StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn trailing_slash_is_normalized() {
		let response = router()
			.handle(
				Request::builder()
					.method(Method::POST)
					.uri("/contact/")
					.build(),
			)
			.await
			.unwrap();
		assert_eq!(&response.body[..], b"contact");
	}
}
