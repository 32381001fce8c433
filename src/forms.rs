use serde::Deserialize;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::SkillCategory;

/// Run `validator` checks and map the first failure to a 422
pub fn validate_payload<T: Validate>(payload: &T) -> Result<()> {
	payload.validate().map_err(|errors| {
		let detail = errors
			.field_errors()
			.iter()
			.map(|(field, errs)| {
				let msg = errs
					.first()
					.and_then(|e| e.message.as_ref())
					.map(|m| m.to_string())
					.unwrap_or_else(|| "is invalid".to_string());
				format!("{} {}", field, msg)
			})
			.collect::<Vec<_>>()
			.join("; ");
		Error::Validation(detail)
	})
}

/// Public contact form submission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
	#[validate(length(min = 1, message = "is required"))]
	pub name: String,
	#[validate(email(message = "must be a valid address"))]
	pub email: String,
	#[validate(length(min = 1, message = "is required"))]
	pub message: String,
}

/// Operator login form
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
	pub email: String,
	pub password: String,
}

/// New skill from the admin dashboard
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SkillPayload {
	#[validate(length(min = 1, message = "is required"))]
	pub name: String,
	pub category: SkillCategory,
	#[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
	pub level: Option<i64>,
}

/// New project from the admin dashboard
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectPayload {
	#[validate(length(min = 1, message = "is required"))]
	pub title: String,
	#[validate(length(min = 1, message = "is required"))]
	pub description: String,
	#[serde(default)]
	pub technologies: Vec<String>,
	pub image_url: Option<String>,
	pub demo_url: Option<String>,
	pub repo_url: Option<String>,
}

/// New experience entry from the admin dashboard
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExperiencePayload {
	#[validate(length(min = 1, message = "is required"))]
	pub role: String,
	#[validate(length(min = 1, message = "is required"))]
	pub company: String,
	#[validate(length(min = 1, message = "is required"))]
	pub start_date: String,
	pub end_date: Option<String>,
	#[serde(default)]
	pub description: String,
}

/// Hero singleton contents
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HeroPayload {
	#[validate(length(min = 1, message = "is required"))]
	pub greeting: String,
	#[validate(length(min = 1, message = "is required"))]
	pub name: String,
	#[serde(default)]
	pub role_text: String,
	#[serde(default)]
	pub headline_prefix: String,
	#[serde(default)]
	pub headline_highlight: String,
	#[serde(default)]
	pub headline_suffix: String,
	#[serde(default)]
	pub description: String,
	pub resume_url: Option<String>,
}

/// Contact settings singleton contents
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactSettingsPayload {
	#[validate(email(message = "must be a valid address"))]
	pub email: String,
	pub phone: Option<String>,
	pub address: Option<String>,
	pub github_url: Option<String>,
	pub linkedin_url: Option<String>,
	pub twitter_url: Option<String>,
}

/// Hero save payload; the dashboard edits both singletons on one card,
/// so saving writes hero and contact settings together.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HeroSavePayload {
	#[validate(nested)]
	pub hero: HeroPayload,
	#[validate(nested)]
	pub contact: ContactSettingsPayload,
}

/// About singleton contents
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AboutPayload {
	pub profile_image_url: Option<String>,
	#[validate(length(min = 1, message = "is required"))]
	pub bio_paragraph_1: String,
	#[serde(default)]
	pub bio_paragraph_2: String,
	pub years_of_experience: Option<String>,
}
