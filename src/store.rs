use chrono::Utc;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::feed::{ChangeFeed, ChangeKind, TableChange};
use crate::forms::{
	AboutPayload, ContactForm, ContactSettingsPayload, ExperiencePayload, HeroPayload,
	ProjectPayload, SkillPayload,
};
use crate::models::{
	About, AdminData, ContactSettings, Experience, HeroData, Message, Project, SiteContent,
	Skill, ABOUT_ID, CONTACT_SETTINGS_ID, HERO_ID,
};

/// Tables the admin panel may delete rows from
const DELETABLE_TABLES: &[&str] = &["skills", "projects", "experience", "messages"];

/// Data access layer for portfolio content.
///
/// Every mutation publishes a [`TableChange`] on the feed after the
/// write commits, so connected dashboards converge on the new state.
#[derive(Clone)]
pub struct PortfolioStore {
	db: Database,
	feed: ChangeFeed,
}

impl PortfolioStore {
	pub fn new(db: Database, feed: ChangeFeed) -> Self {
		Self { db, feed }
	}

	// Listings. Each collection has a fixed presentation order.

	/// Projects, newest first
	pub async fn list_projects(&self) -> Result<Vec<Project>> {
		let rows = sqlx::query_as::<_, Project>(
			"SELECT * FROM projects ORDER BY created_at DESC",
		)
		.fetch_all(self.db.pool())
		.await?;
		Ok(rows)
	}

	/// Skills grouped by category, stable within each group
	pub async fn list_skills(&self) -> Result<Vec<Skill>> {
		let rows = sqlx::query_as::<_, Skill>(
			"SELECT * FROM skills ORDER BY category, created_at",
		)
		.fetch_all(self.db.pool())
		.await?;
		Ok(rows)
	}

	/// Experience entries, most recent start date first
	pub async fn list_experience(&self) -> Result<Vec<Experience>> {
		let rows = sqlx::query_as::<_, Experience>(
			"SELECT * FROM experience ORDER BY start_date DESC",
		)
		.fetch_all(self.db.pool())
		.await?;
		Ok(rows)
	}

	/// Contact messages, newest first
	pub async fn list_messages(&self) -> Result<Vec<Message>> {
		let rows = sqlx::query_as::<_, Message>(
			"SELECT * FROM messages ORDER BY created_at DESC",
		)
		.fetch_all(self.db.pool())
		.await?;
		Ok(rows)
	}

	// Singleton reads

	pub async fn get_hero(&self) -> Result<Option<HeroData>> {
		let row = sqlx::query_as::<_, HeroData>("SELECT * FROM hero WHERE id = ?")
			.bind(HERO_ID)
			.fetch_optional(self.db.pool())
			.await?;
		Ok(row)
	}

	pub async fn get_about(&self) -> Result<Option<About>> {
		let row = sqlx::query_as::<_, About>("SELECT * FROM about WHERE id = ?")
			.bind(ABOUT_ID)
			.fetch_optional(self.db.pool())
			.await?;
		Ok(row)
	}

	pub async fn get_contact_settings(&self) -> Result<Option<ContactSettings>> {
		let row = sqlx::query_as::<_, ContactSettings>(
			"SELECT * FROM contact_settings WHERE id = ?",
		)
		.bind(CONTACT_SETTINGS_ID)
		.fetch_optional(self.db.pool())
		.await?;
		Ok(row)
	}

	/// Fetch everything the public page renders
	pub async fn fetch_site(&self) -> Result<SiteContent> {
		Ok(SiteContent {
			hero: self.get_hero().await?,
			about: self.get_about().await?,
			contact: self.get_contact_settings().await?,
			projects: self.list_projects().await?,
			skills: self.list_skills().await?,
			experience: self.list_experience().await?,
		})
	}

	/// Fetch everything the admin dashboard renders
	pub async fn fetch_admin(&self) -> Result<AdminData> {
		Ok(AdminData {
			site: self.fetch_site().await?,
			messages: self.list_messages().await?,
		})
	}

	// Inserts

	pub async fn insert_skill(&self, payload: SkillPayload) -> Result<Skill> {
		let skill = Skill {
			id: Uuid::new_v4().to_string(),
			name: payload.name,
			category: payload.category,
			level: payload.level,
			created_at: Utc::now(),
		};
		sqlx::query(
			"INSERT INTO skills (id, name, category, level, created_at) VALUES (?, ?, ?, ?, ?)",
		)
		.bind(&skill.id)
		.bind(&skill.name)
		.bind(skill.category)
		.bind(skill.level)
		.bind(skill.created_at)
		.execute(self.db.pool())
		.await?;
		self.feed
			.publish(TableChange::new("skills", ChangeKind::Insert, &skill.id));
		Ok(skill)
	}

	pub async fn insert_project(&self, payload: ProjectPayload) -> Result<Project> {
		let project = Project {
			id: Uuid::new_v4().to_string(),
			title: payload.title,
			description: payload.description,
			technologies: payload.technologies,
			image_url: payload.image_url,
			demo_url: payload.demo_url,
			repo_url: payload.repo_url,
			created_at: Utc::now(),
		};
		let technologies = serde_json::to_string(&project.technologies)?;
		sqlx::query(
			"INSERT INTO projects \
			 (id, title, description, technologies, image_url, demo_url, repo_url, created_at) \
			 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
		)
		.bind(&project.id)
		.bind(&project.title)
		.bind(&project.description)
		.bind(&technologies)
		.bind(&project.image_url)
		.bind(&project.demo_url)
		.bind(&project.repo_url)
		.bind(project.created_at)
		.execute(self.db.pool())
		.await?;
		self.feed
			.publish(TableChange::new("projects", ChangeKind::Insert, &project.id));
		Ok(project)
	}

	pub async fn insert_experience(&self, payload: ExperiencePayload) -> Result<Experience> {
		let entry = Experience {
			id: Uuid::new_v4().to_string(),
			role: payload.role,
			company: payload.company,
			start_date: payload.start_date,
			end_date: payload.end_date,
			description: payload.description,
			created_at: Utc::now(),
		};
		sqlx::query(
			"INSERT INTO experience \
			 (id, role, company, start_date, end_date, description, created_at) \
			 VALUES (?, ?, ?, ?, ?, ?, ?)",
		)
		.bind(&entry.id)
		.bind(&entry.role)
		.bind(&entry.company)
		.bind(&entry.start_date)
		.bind(&entry.end_date)
		.bind(&entry.description)
		.bind(entry.created_at)
		.execute(self.db.pool())
		.await?;
		self.feed
			.publish(TableChange::new("experience", ChangeKind::Insert, &entry.id));
		Ok(entry)
	}

	pub async fn insert_message(&self, form: ContactForm) -> Result<Message> {
		let message = Message {
			id: Uuid::new_v4().to_string(),
			name: form.name,
			email: form.email,
			message: form.message,
			created_at: Utc::now(),
		};
		sqlx::query(
			"INSERT INTO messages (id, name, email, message, created_at) VALUES (?, ?, ?, ?, ?)",
		)
		.bind(&message.id)
		.bind(&message.name)
		.bind(&message.email)
		.bind(&message.message)
		.bind(message.created_at)
		.execute(self.db.pool())
		.await?;
		// Message inserts carry the row so dashboards can prepend it
		// without a refetch.
		self.feed.publish(
			TableChange::new("messages", ChangeKind::Insert, &message.id)
				.with_row(serde_json::to_value(&message)?),
		);
		Ok(message)
	}

	// Deletes

	/// Delete one row from a deletable table.
	///
	/// The table name is checked against a whitelist before it is
	/// interpolated into SQL. Deleting a missing row is a 404.
	pub async fn delete_row(&self, table: &str, id: &str) -> Result<()> {
		if !DELETABLE_TABLES.contains(&table) {
			return Err(Error::BadRequest(format!("cannot delete from {}", table)));
		}

		let sql = format!("DELETE FROM {} WHERE id = ?", table);
		let result = sqlx::query(&sql).bind(id).execute(self.db.pool()).await?;
		if result.rows_affected() == 0 {
			return Err(Error::NotFound(format!("{}/{}", table, id)));
		}

		self.feed
			.publish(TableChange::new(table, ChangeKind::Delete, id));
		Ok(())
	}

	// Singleton upserts. Each writes at its fixed id, so repeated
	// saves update the same row.

	pub async fn upsert_hero(&self, payload: HeroPayload) -> Result<HeroData> {
		let hero = HeroData {
			id: HERO_ID.to_string(),
			greeting: payload.greeting,
			name: payload.name,
			role_text: payload.role_text,
			headline_prefix: payload.headline_prefix,
			headline_highlight: payload.headline_highlight,
			headline_suffix: payload.headline_suffix,
			description: payload.description,
			resume_url: payload.resume_url,
			updated_at: Utc::now(),
		};
		sqlx::query(
			"INSERT INTO hero \
			 (id, greeting, name, role_text, headline_prefix, headline_highlight, \
			  headline_suffix, description, resume_url, updated_at) \
			 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
			 ON CONFLICT(id) DO UPDATE SET \
			 greeting = excluded.greeting, name = excluded.name, \
			 role_text = excluded.role_text, headline_prefix = excluded.headline_prefix, \
			 headline_highlight = excluded.headline_highlight, \
			 headline_suffix = excluded.headline_suffix, \
			 description = excluded.description, resume_url = excluded.resume_url, \
			 updated_at = excluded.updated_at",
		)
		.bind(&hero.id)
		.bind(&hero.greeting)
		.bind(&hero.name)
		.bind(&hero.role_text)
		.bind(&hero.headline_prefix)
		.bind(&hero.headline_highlight)
		.bind(&hero.headline_suffix)
		.bind(&hero.description)
		.bind(&hero.resume_url)
		.bind(hero.updated_at)
		.execute(self.db.pool())
		.await?;
		self.feed
			.publish(TableChange::new("hero", ChangeKind::Update, HERO_ID));
		Ok(hero)
	}

	pub async fn upsert_contact_settings(
		&self,
		payload: ContactSettingsPayload,
	) -> Result<ContactSettings> {
		let contact = ContactSettings {
			id: CONTACT_SETTINGS_ID.to_string(),
			email: payload.email,
			phone: payload.phone,
			address: payload.address,
			github_url: payload.github_url,
			linkedin_url: payload.linkedin_url,
			twitter_url: payload.twitter_url,
			updated_at: Utc::now(),
		};
		sqlx::query(
			"INSERT INTO contact_settings \
			 (id, email, phone, address, github_url, linkedin_url, twitter_url, updated_at) \
			 VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
			 ON CONFLICT(id) DO UPDATE SET \
			 email = excluded.email, phone = excluded.phone, address = excluded.address, \
			 github_url = excluded.github_url, linkedin_url = excluded.linkedin_url, \
			 twitter_url = excluded.twitter_url, updated_at = excluded.updated_at",
		)
		.bind(&contact.id)
		.bind(&contact.email)
		.bind(&contact.phone)
		.bind(&contact.address)
		.bind(&contact.github_url)
		.bind(&contact.linkedin_url)
		.bind(&contact.twitter_url)
		.bind(contact.updated_at)
		.execute(self.db.pool())
		.await?;
		self.feed.publish(TableChange::new(
			"contact_settings",
			ChangeKind::Update,
			CONTACT_SETTINGS_ID,
		));
		Ok(contact)
	}

	/// Save the hero card. The dashboard edits hero text and contact
	/// links on one card, so both singletons are written together.
	pub async fn save_hero(
		&self,
		hero: HeroPayload,
		contact: ContactSettingsPayload,
	) -> Result<(HeroData, ContactSettings)> {
		let hero = self.upsert_hero(hero).await?;
		let contact = self.upsert_contact_settings(contact).await?;
		Ok((hero, contact))
	}

	pub async fn upsert_about(&self, payload: AboutPayload) -> Result<About> {
		let about = About {
			id: ABOUT_ID.to_string(),
			profile_image_url: payload.profile_image_url,
			bio_paragraph_1: payload.bio_paragraph_1,
			bio_paragraph_2: payload.bio_paragraph_2,
			years_of_experience: payload.years_of_experience,
			updated_at: Utc::now(),
		};
		sqlx::query(
			"INSERT INTO about \
			 (id, profile_image_url, bio_paragraph_1, bio_paragraph_2, \
			  years_of_experience, updated_at) \
			 VALUES (?, ?, ?, ?, ?, ?) \
			 ON CONFLICT(id) DO UPDATE SET \
			 profile_image_url = excluded.profile_image_url, \
			 bio_paragraph_1 = excluded.bio_paragraph_1, \
			 bio_paragraph_2 = excluded.bio_paragraph_2, \
			 years_of_experience = excluded.years_of_experience, \
			 updated_at = excluded.updated_at",
		)
		.bind(&about.id)
		.bind(&about.profile_image_url)
		.bind(&about.bio_paragraph_1)
		.bind(&about.bio_paragraph_2)
		.bind(&about.years_of_experience)
		.bind(about.updated_at)
		.execute(self.db.pool())
		.await?;
		self.feed
			.publish(TableChange::new("about", ChangeKind::Update, ABOUT_ID));
		Ok(about)
	}
}
