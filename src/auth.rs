use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Name of the admin session cookie
pub const SESSION_COOKIE: &str = "sid";

/// The single operator credential the admin panel accepts.
///
/// There is no user table; the email and Argon2 password hash come
/// from configuration, and every valid login is the same operator.
#[derive(Clone)]
pub struct OperatorCredentials {
	email: String,
	password_hash: String,
}

impl OperatorCredentials {
	pub fn new(email: String, password_hash: String) -> Self {
		Self {
			email,
			password_hash,
		}
	}

	/// Check a login attempt against the configured credential.
	///
	/// Email comparison is case-insensitive; the password is verified
	/// against the stored Argon2 hash.
	pub fn verify(&self, email: &str, password: &str) -> bool {
		if !self.email.eq_ignore_ascii_case(email) {
			return false;
		}
		let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
			return false;
		};
		Argon2::default()
			.verify_password(password.as_bytes(), &parsed)
			.is_ok()
	}
}

/// Hash a password for the `FOLIO_ADMIN_PASSWORD_HASH` setting
pub fn hash_password(password: &str) -> Result<String> {
	let salt = SaltString::generate(&mut OsRng);
	let hash = Argon2::default()
		.hash_password(password.as_bytes(), &salt)
		.map_err(|e| Error::Config(format!("password hashing failed: {}", e)))?;
	Ok(hash.to_string())
}

struct Session {
	expires_at: DateTime<Utc>,
}

/// In-memory session store.
///
/// Sessions are opaque random tokens with an absolute expiry. A server
/// restart logs the operator out, which is acceptable for a
/// single-operator site.
pub struct SessionStore {
	sessions: RwLock<HashMap<String, Session>>,
	ttl: ChronoDuration,
}

impl SessionStore {
	pub fn new(ttl: Duration) -> Self {
		Self {
			sessions: RwLock::new(HashMap::new()),
			ttl: ChronoDuration::from_std(ttl).unwrap_or_else(|_| ChronoDuration::hours(24)),
		}
	}

	/// Create a session and return its token
	pub fn create(&self) -> String {
		let token = Uuid::new_v4().simple().to_string();
		self.sessions.write().insert(
			token.clone(),
			Session {
				expires_at: Utc::now() + self.ttl,
			},
		);
		token
	}

	/// Whether a token names a live session; expired tokens are pruned
	pub fn is_valid(&self, token: &str) -> bool {
		let now = Utc::now();
		{
			let sessions = self.sessions.read();
			match sessions.get(token) {
				Some(session) if session.expires_at > now => return true,
				None => return false,
				Some(_) => {}
			}
		}
		self.sessions.write().remove(token);
		false
	}

	/// Remove a session (logout)
	pub fn revoke(&self, token: &str) {
		self.sessions.write().remove(token);
	}
}

/// Set-Cookie value for a fresh session
pub fn session_cookie(token: &str, ttl: Duration) -> String {
	format!(
		"{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
		SESSION_COOKIE,
		token,
		ttl.as_secs()
	)
}

/// Set-Cookie value that clears the session cookie
pub fn clear_session_cookie() -> String {
	format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}
