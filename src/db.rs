use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::error::Result;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
	id TEXT PRIMARY KEY,
	title TEXT NOT NULL,
	description TEXT NOT NULL,
	technologies TEXT NOT NULL DEFAULT '[]',
	image_url TEXT,
	demo_url TEXT,
	repo_url TEXT,
	created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS skills (
	id TEXT PRIMARY KEY,
	name TEXT NOT NULL,
	category TEXT NOT NULL,
	level INTEGER,
	created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS experience (
	id TEXT PRIMARY KEY,
	role TEXT NOT NULL,
	company TEXT NOT NULL,
	start_date TEXT NOT NULL,
	end_date TEXT,
	description TEXT NOT NULL DEFAULT '',
	created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS about (
	id TEXT PRIMARY KEY,
	profile_image_url TEXT,
	bio_paragraph_1 TEXT NOT NULL,
	bio_paragraph_2 TEXT NOT NULL DEFAULT '',
	years_of_experience TEXT,
	updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS hero (
	id TEXT PRIMARY KEY,
	greeting TEXT NOT NULL,
	name TEXT NOT NULL,
	role_text TEXT NOT NULL,
	headline_prefix TEXT NOT NULL,
	headline_highlight TEXT NOT NULL,
	headline_suffix TEXT NOT NULL,
	description TEXT NOT NULL,
	resume_url TEXT,
	updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contact_settings (
	id TEXT PRIMARY KEY,
	email TEXT NOT NULL,
	phone TEXT,
	address TEXT,
	github_url TEXT,
	linkedin_url TEXT,
	twitter_url TEXT,
	updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
	id TEXT PRIMARY KEY,
	name TEXT NOT NULL,
	email TEXT NOT NULL,
	message TEXT NOT NULL,
	created_at TEXT NOT NULL
);
"#;

/// Database connection wrapper around a SQLite pool.
///
/// The schema is applied on connect with `CREATE TABLE IF NOT EXISTS`,
/// so a fresh database file is usable immediately.
#[derive(Clone)]
pub struct Database {
	pool: SqlitePool,
}

impl Database {
	/// Connect to the database at `url`, creating the file if needed
	pub async fn connect(url: &str) -> Result<Self> {
		let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
		let pool = SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(options)
			.await?;
		let db = Self { pool };
		db.init_schema().await?;
		Ok(db)
	}

	/// In-memory database for tests.
	///
	/// Capped at one connection: each `:memory:` connection is its own
	/// database, so a larger pool would scatter the schema.
	pub async fn in_memory() -> Result<Self> {
		let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.connect_with(options)
			.await?;
		let db = Self { pool };
		db.init_schema().await?;
		Ok(db)
	}

	async fn init_schema(&self) -> Result<()> {
		sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
		Ok(())
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn schema_creates_all_tables() {
		let db = Database::in_memory().await.unwrap();
		let tables: Vec<(String,)> = sqlx::query_as(
			"SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
		)
		.fetch_all(db.pool())
		.await
		.unwrap();

		let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
		for expected in [
			"about",
			"contact_settings",
			"experience",
			"hero",
			"messages",
			"projects",
			"skills",
		] {
			assert!(names.contains(&expected), "missing table {}", expected);
		}
	}

	#[tokio::test]
	async fn schema_application_is_idempotent() {
		let db = Database::in_memory().await.unwrap();
		db.init_schema().await.unwrap();
		db.init_schema().await.unwrap();
	}
}
