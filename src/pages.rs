use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::Result;
use crate::models::{SiteContent, Skill, SkillCategory};

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
	let mut tera = Tera::default();
	tera.add_raw_templates(vec![
		("base.html", include_str!("../templates/base.html")),
		("index.html", include_str!("../templates/index.html")),
		("login.html", include_str!("../templates/login.html")),
		("admin.html", include_str!("../templates/admin.html")),
	])
	.unwrap_or_else(|e| panic!("template compilation failed: {}", e));
	tera
});

/// Skills bucketed under one category heading
#[derive(Debug, Serialize)]
pub struct SkillGroup {
	pub label: &'static str,
	pub skills: Vec<Skill>,
}

/// Group skills into the category columns the page renders.
/// Empty categories are dropped.
pub fn group_skills(skills: &[Skill]) -> Vec<SkillGroup> {
	SkillCategory::ALL
		.iter()
		.map(|category| SkillGroup {
			label: category.label(),
			skills: skills
				.iter()
				.filter(|s| s.category == *category)
				.cloned()
				.collect(),
		})
		.filter(|group| !group.skills.is_empty())
		.collect()
}

/// Render the public page from the given content set.
///
/// `sent` shows the thank-you note after a contact submission;
/// `contact_error` re-renders the form with a validation message.
pub fn render_home(
	content: &SiteContent,
	sent: bool,
	contact_error: Option<&str>,
) -> Result<String> {
	let mut context = Context::new();
	context.insert("hero", &content.hero);
	context.insert("about", &content.about);
	context.insert("contact", &content.contact);
	context.insert("projects", &content.projects);
	context.insert("skill_groups", &group_skills(&content.skills));
	context.insert("experience", &content.experience);
	context.insert("sent", &sent);
	context.insert("contact_error", &contact_error);
	Ok(TEMPLATES.render("index.html", &context)?)
}

/// Render the login page, optionally with a failure message
pub fn render_login(error: Option<&str>) -> Result<String> {
	let mut context = Context::new();
	context.insert("error", &error);
	Ok(TEMPLATES.render("login.html", &context)?)
}

/// Render the admin dashboard shell; data arrives over the JSON API
pub fn render_admin() -> Result<String> {
	Ok(TEMPLATES.render("admin.html", &Context::new())?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fallback;

	#[test]
	fn home_renders_placeholder_content() {
		let html = render_home(&fallback::site_content(), false, None).unwrap();
		assert!(html.contains("E-Commerce Dashboard"));
		assert!(html.contains("Senior Frontend Engineer"));
		assert!(html.contains("Get In Touch"));
	}

	#[test]
	fn home_shows_thanks_after_submission() {
		let html = render_home(&fallback::site_content(), true, None).unwrap();
		assert!(html.contains("Thanks for reaching out"));
	}

	#[test]
	fn home_shows_contact_errors_inline() {
		let html =
			render_home(&fallback::site_content(), false, Some("email must be a valid address"))
				.unwrap();
		assert!(html.contains("email must be a valid address"));
	}

	#[test]
	fn login_renders_with_and_without_error() {
		let html = render_login(None).unwrap();
		assert!(html.contains("name=\"password\""));

		let html = render_login(Some("Invalid email or password")).unwrap();
		assert!(html.contains("Invalid email or password"));
	}

	#[test]
	fn admin_shell_renders() {
		let html = render_admin().unwrap();
		assert!(html.contains("id=\"dashboard\""));
	}

	#[test]
	fn empty_skill_categories_are_dropped() {
		let content = fallback::site_content();
		let groups = group_skills(&content.skills);
		assert!(groups.iter().all(|g| !g.skills.is_empty()));
		assert!(groups.iter().any(|g| g.label == "Frontend"));
	}
}
