use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed id of the hero singleton row
pub const HERO_ID: &str = "10000000-0000-0000-0000-000000000000";
/// Fixed id of the contact settings singleton row (shares the hero id scheme)
pub const CONTACT_SETTINGS_ID: &str = "10000000-0000-0000-0000-000000000000";
/// Fixed id of the about singleton row
pub const ABOUT_ID: &str = "20000000-0000-0000-0000-000000000000";

/// A portfolio project entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
	pub id: String,
	pub title: String,
	pub description: String,
	#[sqlx(json)]
	pub technologies: Vec<String>,
	pub image_url: Option<String>,
	pub demo_url: Option<String>,
	pub repo_url: Option<String>,
	pub created_at: DateTime<Utc>,
}

/// Skill category buckets shown as columns on the public site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SkillCategory {
	Frontend,
	Backend,
	Tools,
	Languages,
	Other,
}

impl SkillCategory {
	pub const ALL: [SkillCategory; 5] = [
		SkillCategory::Frontend,
		SkillCategory::Backend,
		SkillCategory::Tools,
		SkillCategory::Languages,
		SkillCategory::Other,
	];

	pub fn label(&self) -> &'static str {
		match self {
			SkillCategory::Frontend => "Frontend",
			SkillCategory::Backend => "Backend",
			SkillCategory::Tools => "Tools",
			SkillCategory::Languages => "Languages",
			SkillCategory::Other => "Other",
		}
	}
}

/// A single skill with its category bucket and optional proficiency
/// level (0-100)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
	pub id: String,
	pub name: String,
	pub category: SkillCategory,
	pub level: Option<i64>,
	pub created_at: DateTime<Utc>,
}

/// A work experience entry.
///
/// Dates are kept as free-form strings (`2023-04`, `2021`) because the
/// timeline renders them verbatim; ordering uses `start_date` lexically,
/// which works for ISO-style year-month values. A null `end_date`
/// renders as "Present".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Experience {
	pub id: String,
	pub role: String,
	pub company: String,
	pub start_date: String,
	pub end_date: Option<String>,
	pub description: String,
	pub created_at: DateTime<Utc>,
}

/// Singleton about-section content
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct About {
	pub id: String,
	pub profile_image_url: Option<String>,
	pub bio_paragraph_1: String,
	pub bio_paragraph_2: String,
	pub years_of_experience: Option<String>,
	pub updated_at: DateTime<Utc>,
}

/// Singleton hero-section content
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HeroData {
	pub id: String,
	pub greeting: String,
	pub name: String,
	pub role_text: String,
	pub headline_prefix: String,
	pub headline_highlight: String,
	pub headline_suffix: String,
	pub description: String,
	pub resume_url: Option<String>,
	pub updated_at: DateTime<Utc>,
}

/// Singleton contact block settings (email, phone, social links)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactSettings {
	pub id: String,
	pub email: String,
	pub phone: Option<String>,
	pub address: Option<String>,
	pub github_url: Option<String>,
	pub linkedin_url: Option<String>,
	pub twitter_url: Option<String>,
	pub updated_at: DateTime<Utc>,
}

/// A message submitted through the public contact form
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
	pub id: String,
	pub name: String,
	pub email: String,
	pub message: String,
	pub created_at: DateTime<Utc>,
}

/// Everything the public page needs, fetched in one pass.
///
/// Singletons are optional: a missing row falls back to placeholder
/// content at render time rather than failing the page.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContent {
	pub hero: Option<HeroData>,
	pub about: Option<About>,
	pub contact: Option<ContactSettings>,
	pub projects: Vec<Project>,
	pub skills: Vec<Skill>,
	pub experience: Vec<Experience>,
}

/// Everything the admin dashboard needs, including messages
#[derive(Debug, Clone, Serialize)]
pub struct AdminData {
	#[serde(flatten)]
	pub site: SiteContent,
	pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn singleton_ids_are_distinct_per_concept() {
		assert_eq!(HERO_ID, CONTACT_SETTINGS_ID);
		assert_ne!(HERO_ID, ABOUT_ID);
	}

	#[test]
	fn skill_category_serializes_lowercase() {
		let json = serde_json::to_string(&SkillCategory::Frontend).unwrap();
		assert_eq!(json, "\"frontend\"");
		let back: SkillCategory = serde_json::from_str("\"languages\"").unwrap();
		assert_eq!(back, SkillCategory::Languages);
	}

	#[test]
	fn admin_data_flattens_site_content() {
		let data = AdminData {
			site: SiteContent {
				hero: None,
				about: None,
				contact: None,
				projects: vec![],
				skills: vec![],
				experience: vec![],
			},
			messages: vec![],
		};
		let json = serde_json::to_value(&data).unwrap();
		assert!(json.get("projects").is_some());
		assert!(json.get("messages").is_some());
		assert!(json.get("site").is_none());
	}
}
