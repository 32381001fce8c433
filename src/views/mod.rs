pub mod admin;
pub mod auth;
pub mod contact;
pub mod media;
pub mod public;

pub use admin::{
	AboutSaveView, AdminDataView, AdminDeleteView, AdminPanelView, ContactSaveView, EventsView,
	ExperienceCreateView, HeroSaveView, ProjectCreateView, SkillCreateView, UploadView,
};
pub use auth::{LoginFormView, LoginView, LogoutView};
pub use contact::ContactView;
pub use media::MediaView;
pub use public::HomeView;
