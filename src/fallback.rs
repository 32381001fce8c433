//! Placeholder site content, rendered whenever the datastore is
//! unconfigured, unreachable, or too slow to answer. The public page
//! never shows an error to visitors.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
	About, ContactSettings, Experience, HeroData, Project, SiteContent, Skill, SkillCategory,
	ABOUT_ID, CONTACT_SETTINGS_ID, HERO_ID,
};

fn epoch() -> DateTime<Utc> {
	Utc.timestamp_opt(0, 0).single().unwrap_or_else(Utc::now)
}

/// Build the placeholder content set
pub fn site_content() -> SiteContent {
	let hero = HeroData {
		id: HERO_ID.to_string(),
		greeting: "Available for hire".to_string(),
		name: "My Portfolio".to_string(),
		role_text: "Full Stack Developer".to_string(),
		headline_prefix: "Building".to_string(),
		headline_highlight: "Digital Experiences".to_string(),
		headline_suffix: "that Matter.".to_string(),
		description: "I'm a Full Stack Developer passionate about building accessible, \
		              pixel-perfect, and performant web applications."
			.to_string(),
		resume_url: None,
		updated_at: epoch(),
	};

	let about = About {
		id: ABOUT_ID.to_string(),
		profile_image_url: None,
		bio_paragraph_1: "I am a passionate Full Stack Developer with a strong focus on \
		                  building scalable web applications. My journey began with a \
		                  curiosity for how things work on the internet, which quickly \
		                  turned into a career crafting beautiful digital experiences."
			.to_string(),
		bio_paragraph_2: "I love solving complex problems and turning ideas into reality \
		                  through clean and efficient code."
			.to_string(),
		years_of_experience: None,
		updated_at: epoch(),
	};

	let contact = ContactSettings {
		id: CONTACT_SETTINGS_ID.to_string(),
		email: "hello@example.com".to_string(),
		phone: None,
		address: None,
		github_url: Some("https://github.com".to_string()),
		linkedin_url: Some("https://linkedin.com".to_string()),
		twitter_url: None,
		updated_at: epoch(),
	};

	let projects = vec![
		project(
			"1",
			"E-Commerce Dashboard",
			"A comprehensive dashboard for managing online stores with real-time \
			 analytics and inventory management.",
			&["Next.js", "Tailwind", "Supabase"],
		),
		project(
			"2",
			"AI Chat Application",
			"Real-time chat interface powered by OpenAI API with streaming responses \
			 and history persistence.",
			&["React", "Node.js", "Socket.io"],
		),
		project(
			"3",
			"Task Management Tool",
			"A collaborative Kanban-style task management app with real-time updates \
			 and team features.",
			&["Vue", "Firebase", "Pinia"],
		),
	];

	let skills = [
		("React", SkillCategory::Frontend),
		("Next.js", SkillCategory::Frontend),
		("TailwindCSS", SkillCategory::Frontend),
		("Framer Motion", SkillCategory::Frontend),
		("Node.js", SkillCategory::Backend),
		("Supabase", SkillCategory::Backend),
		("PostgreSQL", SkillCategory::Backend),
		("Express", SkillCategory::Backend),
		("TypeScript", SkillCategory::Other),
		("JavaScript", SkillCategory::Other),
		("Python", SkillCategory::Other),
		("Git", SkillCategory::Tools),
	]
	.iter()
	.enumerate()
	.map(|(i, (name, category))| Skill {
		id: (i + 1).to_string(),
		name: name.to_string(),
		category: *category,
		level: None,
		created_at: epoch(),
	})
	.collect();

	let experience = vec![
		Experience {
			id: "1".to_string(),
			role: "Senior Frontend Engineer".to_string(),
			company: "Tech Corp".to_string(),
			start_date: "2023".to_string(),
			end_date: None,
			description: "Leading the frontend team in building scalable web applications. \
			              Implemented new design system lowering tech debt by 30%."
				.to_string(),
			created_at: epoch(),
		},
		Experience {
			id: "2".to_string(),
			role: "Full Stack Developer".to_string(),
			company: "Startup Inc".to_string(),
			start_date: "2021".to_string(),
			end_date: Some("2023".to_string()),
			description: "Developed and maintained multiple client projects using MERN \
			              stack. Optimized database queries improving load times by 40%."
				.to_string(),
			created_at: epoch(),
		},
	];

	SiteContent {
		hero: Some(hero),
		about: Some(about),
		contact: Some(contact),
		projects,
		skills,
		experience,
	}
}

fn project(id: &str, title: &str, description: &str, technologies: &[&str]) -> Project {
	Project {
		id: id.to_string(),
		title: title.to_string(),
		description: description.to_string(),
		technologies: technologies.iter().map(|t| t.to_string()).collect(),
		image_url: None,
		demo_url: Some("https://vercel.com".to_string()),
		repo_url: Some("https://github.com".to_string()),
		created_at: epoch(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn placeholder_content_is_complete() {
		let content = site_content();
		assert!(content.hero.is_some());
		assert!(content.about.is_some());
		assert!(content.contact.is_some());
		assert_eq!(content.projects.len(), 3);
		assert_eq!(content.skills.len(), 12);
		assert_eq!(content.experience.len(), 2);
	}

	#[test]
	fn experience_is_most_recent_first() {
		let content = site_content();
		assert!(content.experience[0].start_date > content.experience[1].start_date);
	}

	#[test]
	fn ongoing_roles_have_no_end_date() {
		let content = site_content();
		assert!(content.experience[0].end_date.is_none());
		assert_eq!(content.experience[1].end_date.as_deref(), Some("2023"));
	}
}
