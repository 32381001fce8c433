use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Runtime settings, loaded from `FOLIO_`-prefixed environment variables.
///
/// Only `FOLIO_ADMIN_EMAIL` and `FOLIO_ADMIN_PASSWORD_HASH` are required
/// for the admin panel; everything else has a sensible default. With no
/// `FOLIO_DATABASE_URL` the site runs in fallback mode and renders the
/// built-in placeholder content.
#[derive(Debug, Clone)]
pub struct Settings {
	/// Address the server binds to. `FOLIO_BIND_ADDR`, default `127.0.0.1:8000`.
	pub bind_addr: SocketAddr,
	/// SQLite connection string, e.g. `sqlite://folio.db`. `FOLIO_DATABASE_URL`.
	pub database_url: Option<String>,
	/// Directory that backs the media bucket. `FOLIO_MEDIA_ROOT`, default `portfolio-assets`.
	pub media_root: String,
	/// URL prefix media files are served under. `FOLIO_MEDIA_URL`, default `/media`.
	pub media_url: String,
	/// Operator login email. `FOLIO_ADMIN_EMAIL`.
	pub admin_email: Option<String>,
	/// Argon2 hash of the operator password. `FOLIO_ADMIN_PASSWORD_HASH`.
	pub admin_password_hash: Option<String>,
	/// Rendered-page cache lifetime in seconds. `FOLIO_PAGE_CACHE_TTL`, default 0 (disabled).
	pub page_cache_ttl: Duration,
	/// Budget for datastore reads before falling back. `FOLIO_FETCH_TIMEOUT_SECS`, default 5.
	pub fetch_timeout: Duration,
	/// Admin session lifetime in seconds. `FOLIO_SESSION_TTL_SECS`, default 86400.
	pub session_ttl: Duration,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
			database_url: None,
			media_root: "portfolio-assets".to_string(),
			media_url: "/media".to_string(),
			admin_email: None,
			admin_password_hash: None,
			page_cache_ttl: Duration::ZERO,
			fetch_timeout: Duration::from_secs(5),
			session_ttl: Duration::from_secs(86400),
		}
	}
}

impl Settings {
	/// Load settings from the environment
	pub fn from_env() -> Result<Self> {
		let mut settings = Settings::default();

		if let Ok(addr) = env::var("FOLIO_BIND_ADDR") {
			settings.bind_addr = addr
				.parse()
				.map_err(|_| Error::Config(format!("invalid FOLIO_BIND_ADDR: {}", addr)))?;
		}
		if let Ok(url) = env::var("FOLIO_DATABASE_URL") {
			if !url.is_empty() {
				settings.database_url = Some(url);
			}
		}
		if let Ok(root) = env::var("FOLIO_MEDIA_ROOT") {
			settings.media_root = root;
		}
		if let Ok(url) = env::var("FOLIO_MEDIA_URL") {
			settings.media_url = url;
		}
		if let Ok(email) = env::var("FOLIO_ADMIN_EMAIL") {
			settings.admin_email = Some(email);
		}
		if let Ok(hash) = env::var("FOLIO_ADMIN_PASSWORD_HASH") {
			settings.admin_password_hash = Some(hash);
		}
		if let Ok(ttl) = env::var("FOLIO_PAGE_CACHE_TTL") {
			let secs: u64 = ttl
				.parse()
				.map_err(|_| Error::Config(format!("invalid FOLIO_PAGE_CACHE_TTL: {}", ttl)))?;
			settings.page_cache_ttl = Duration::from_secs(secs);
		}
		if let Ok(timeout) = env::var("FOLIO_FETCH_TIMEOUT_SECS") {
			let secs: u64 = timeout.parse().map_err(|_| {
				Error::Config(format!("invalid FOLIO_FETCH_TIMEOUT_SECS: {}", timeout))
			})?;
			settings.fetch_timeout = Duration::from_secs(secs);
		}
		if let Ok(ttl) = env::var("FOLIO_SESSION_TTL_SECS") {
			let secs: u64 = ttl
				.parse()
				.map_err(|_| Error::Config(format!("invalid FOLIO_SESSION_TTL_SECS: {}", ttl)))?;
			settings.session_ttl = Duration::from_secs(secs);
		}

		Ok(settings)
	}

	/// Whether a datastore is configured at all
	pub fn has_database(&self) -> bool {
		self.database_url.is_some()
	}

	/// Whether the admin panel can accept logins
	pub fn has_admin_credentials(&self) -> bool {
		self.admin_email.is_some() && self.admin_password_hash.is_some()
	}
}
