use hyper::StatusCode;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Application-wide error taxonomy.
///
/// Every variant maps onto an HTTP status via [`Error::status_code`], so
/// views can propagate errors with `?` and let the request boundary turn
/// them into responses.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("template error: {0}")]
	Template(#[from] tera::Error),

	#[error("serialization error: {0}")]
	Serialization(String),

	#[error("{0}")]
	Validation(String),

	#[error("not found: {0}")]
	NotFound(String),

	#[error("authentication required")]
	Unauthorized,

	#[error("forbidden")]
	Forbidden,

	#[error("bad request: {0}")]
	BadRequest(String),

	#[error("storage error: {0}")]
	Storage(String),

	#[error("configuration error: {0}")]
	Config(String),

	#[error("datastore did not respond in time")]
	Timeout,
}

impl Error {
	/// HTTP status code this error maps to
	///
	/// # Examples
	///
	/// ```
	/// use folio::error::Error;
	///
	/// assert_eq!(Error::Unauthorized.status_code(), 401);
	/// assert_eq!(Error::NotFound("row".into()).status_code(), 404);
	/// assert_eq!(Error::Validation("name required".into()).status_code(), 422);
	/// ```
	pub fn status_code(&self) -> u16 {
		match self {
			Error::Database(sqlx::Error::RowNotFound) => 404,
			Error::Database(_) | Error::Template(_) | Error::Serialization(_) => 500,
			Error::Validation(_) => 422,
			Error::NotFound(_) => 404,
			Error::Unauthorized => 401,
			Error::Forbidden => 403,
			Error::BadRequest(_) => 400,
			Error::Storage(_) | Error::Config(_) => 500,
			Error::Timeout => 504,
		}
	}

	/// Typed status for response construction
	pub fn status(&self) -> StatusCode {
		StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Error::Storage(err.to_string())
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Serialization(err.to_string())
	}
}
