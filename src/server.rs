use bytes::Bytes;
use futures::StreamExt;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::{Frame, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::error::Result;
use crate::handler::Handler;
use crate::http::{Request, Response};

type OutBody = http_body_util::combinators::UnsyncBoxBody<Bytes, Infallible>;

/// HTTP server: accepts connections and dispatches to the application
/// handler, turning errors into status responses at the boundary.
pub struct Server {
	addr: SocketAddr,
	handler: Arc<dyn Handler>,
}

impl Server {
	pub fn new(addr: SocketAddr, handler: Arc<dyn Handler>) -> Self {
		Self { addr, handler }
	}

	/// Run the accept loop until the process is stopped
	pub async fn run(self) -> Result<()> {
		let listener = TcpListener::bind(self.addr).await?;
		tracing::info!(addr = %self.addr, "listening");

		loop {
			let (stream, remote_addr) = listener.accept().await?;
			let handler = self.handler.clone();

			tokio::spawn(async move {
				let io = TokioIo::new(stream);
				let service = service_fn(move |req| {
					let handler = handler.clone();
					async move { serve_one(handler, req, remote_addr).await }
				});

				if let Err(error) = http1::Builder::new()
					.serve_connection(io, service)
					.await
				{
					tracing::debug!(%error, "connection closed");
				}
			});
		}
	}
}

async fn serve_one(
	handler: Arc<dyn Handler>,
	req: hyper::Request<Incoming>,
	remote_addr: SocketAddr,
) -> std::result::Result<hyper::Response<OutBody>, Infallible> {
	let (parts, body) = req.into_parts();

	let body = match body.collect().await {
		Ok(collected) => collected.to_bytes(),
		Err(error) => {
			tracing::warn!(%error, "failed to read request body");
			return Ok(plain_response(
				hyper::StatusCode::BAD_REQUEST,
				"bad request body",
			));
		}
	};

	let mut request = Request::new(parts.method, parts.uri, parts.version, parts.headers, body);
	request.remote_addr = Some(remote_addr);

	let response = match handler.handle(request).await {
		Ok(response) => response,
		Err(error) => Response::from(error),
	};

	Ok(into_hyper(response))
}

/// Convert our response into hyper's, picking a buffered or streamed
/// body as the view decided.
fn into_hyper(mut response: Response) -> hyper::Response<OutBody> {
	let body: OutBody = match response.take_stream() {
		Some(stream) => {
			let frames = stream.map(|item| item.map(Frame::data));
			StreamBody::new(frames).boxed_unsync()
		}
		None => Full::new(response.body.clone()).boxed_unsync(),
	};

	let mut out = hyper::Response::new(body);
	*out.status_mut() = response.status;
	*out.headers_mut() = response.headers;
	out
}

fn plain_response(status: hyper::StatusCode, message: &'static str) -> hyper::Response<OutBody> {
	let mut out = hyper::Response::new(Full::new(Bytes::from_static(message.as_bytes())).boxed_unsync());
	*out.status_mut() = status;
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;

	struct FailingHandler;

	#[async_trait]
	impl Handler for FailingHandler {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Err(crate::error::Error::NotFound("thing".into()))
		}
	}

	#[test]
	fn buffered_responses_keep_status_and_headers() {
		let response = Response::ok()
			.with_header("x-test", "1")
			.with_body("hello");
		let hyper_response = into_hyper(response);
		assert_eq!(hyper_response.status(), hyper::StatusCode::OK);
		assert_eq!(
			hyper_response.headers().get("x-test").unwrap().to_str().unwrap(),
			"1"
		);
	}

	#[tokio::test]
	async fn handler_errors_become_status_responses() {
		let handler: Arc<dyn Handler> = Arc::new(FailingHandler);
		let req = hyper::Request::builder()
			.uri("/missing")
			.body(String::new())
			.unwrap();
		// Route through the handler directly; the body type differs
		// from the wire path but the conversion under test is shared.
		let (parts, _) = req.into_parts();
		let request = Request::new(
			parts.method,
			parts.uri,
			parts.version,
			parts.headers,
			Bytes::new(),
		);
		let response = match handler.handle(request).await {
			Ok(response) => response,
			Err(error) => Response::from(error),
		};
		assert_eq!(response.status, hyper::StatusCode::NOT_FOUND);
	}
}
