use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::auth::{OperatorCredentials, SessionStore};
use crate::conf::Settings;
use crate::db::Database;
use crate::error::Result;
use crate::feed::ChangeFeed;
use crate::storage::MediaStorage;
use crate::store::PortfolioStore;

/// Shared application state handed to every view.
///
/// `store` is `None` when no datastore is configured; the public site
/// then serves placeholder content and the admin API reports 500s.
pub struct AppState {
	pub settings: Settings,
	pub store: Option<PortfolioStore>,
	pub feed: ChangeFeed,
	pub sessions: SessionStore,
	pub credentials: Option<OperatorCredentials>,
	pub media: MediaStorage,
	pub page_cache: PageCache,
}

impl AppState {
	/// Assemble state from settings, connecting the datastore if configured
	pub async fn from_settings(settings: Settings) -> Result<Arc<Self>> {
		let feed = ChangeFeed::new();

		let store = match &settings.database_url {
			Some(url) => {
				let db = Database::connect(url).await?;
				Some(PortfolioStore::new(db, feed.clone()))
			}
			None => {
				tracing::warn!("no FOLIO_DATABASE_URL set, serving placeholder content");
				None
			}
		};

		let credentials = match (&settings.admin_email, &settings.admin_password_hash) {
			(Some(email), Some(hash)) => {
				Some(OperatorCredentials::new(email.clone(), hash.clone()))
			}
			_ => {
				tracing::warn!("admin credentials not configured, logins will be rejected");
				None
			}
		};

		Ok(Arc::new(Self {
			sessions: SessionStore::new(settings.session_ttl),
			media: MediaStorage::new(&settings.media_root, settings.media_url.clone()),
			page_cache: PageCache::new(settings.page_cache_ttl),
			store,
			feed,
			credentials,
			settings,
		}))
	}

	/// The datastore, or a configuration error when none is set up
	pub fn require_store(&self) -> Result<&PortfolioStore> {
		self.store
			.as_ref()
			.ok_or_else(|| crate::error::Error::Config("no datastore configured".into()))
	}

	/// Test fixture with an in-memory database and the given credential
	#[doc(hidden)]
	pub async fn for_tests(email: &str, password: &str) -> Result<Arc<Self>> {
		let settings = Settings::default();
		let feed = ChangeFeed::new();
		let db = Database::in_memory().await?;
		let hash = crate::auth::hash_password(password)?;
		Ok(Arc::new(Self {
			sessions: SessionStore::new(settings.session_ttl),
			media: MediaStorage::new(
				std::env::temp_dir().join(format!("folio-test-{}", uuid::Uuid::new_v4())),
				settings.media_url.clone(),
			),
			page_cache: PageCache::new(settings.page_cache_ttl),
			store: Some(PortfolioStore::new(db, feed.clone())),
			feed,
			credentials: Some(OperatorCredentials::new(email.to_string(), hash)),
			settings,
		}))
	}
}

struct CachedPage {
	html: String,
	rendered_at: Instant,
}

/// Single-entry cache for the rendered public page.
///
/// A zero TTL disables caching entirely. Entries are not invalidated
/// on writes; they simply age out, trading freshness for render cost.
pub struct PageCache {
	ttl: Duration,
	entry: Mutex<Option<CachedPage>>,
}

impl PageCache {
	pub fn new(ttl: Duration) -> Self {
		Self {
			ttl,
			entry: Mutex::new(None),
		}
	}

	/// Fresh cached HTML, if any
	pub fn get(&self) -> Option<String> {
		if self.ttl.is_zero() {
			return None;
		}
		let entry = self.entry.lock();
		entry
			.as_ref()
			.filter(|page| page.rendered_at.elapsed() < self.ttl)
			.map(|page| page.html.clone())
	}

	/// Store freshly rendered HTML
	pub fn put(&self, html: &str) {
		if self.ttl.is_zero() {
			return;
		}
		*self.entry.lock() = Some(CachedPage {
			html: html.to_string(),
			rendered_at: Instant::now(),
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero_ttl_disables_the_cache() {
		let cache = PageCache::new(Duration::ZERO);
		cache.put("<html>");
		assert_eq!(cache.get(), None);
	}

	#[test]
	fn fresh_entries_are_served() {
		let cache = PageCache::new(Duration::from_secs(60));
		assert_eq!(cache.get(), None);
		cache.put("<html>");
		assert_eq!(cache.get().as_deref(), Some("<html>"));
	}
}
