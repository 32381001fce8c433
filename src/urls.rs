use hyper::Method;
use std::sync::Arc;

use crate::handler::{Handler, MiddlewareChain};
use crate::middleware::{AdminGuard, RequestLogger};
use crate::routing::UrlRouter;
use crate::state::AppState;
use crate::views::{
	AboutSaveView, AdminDataView, AdminDeleteView, AdminPanelView, ContactSaveView, ContactView,
	EventsView, ExperienceCreateView, HeroSaveView, HomeView, LoginFormView, LoginView,
	LogoutView, MediaView, ProjectCreateView, SkillCreateView, UploadView,
};

/// Build the route table
pub fn routes(state: Arc<AppState>) -> UrlRouter {
	UrlRouter::new()
		.route(Method::GET, "/", Arc::new(HomeView::new(state.clone())))
		.route(
			Method::POST,
			"/contact",
			Arc::new(ContactView::new(state.clone())),
		)
		.route(Method::GET, "/login", Arc::new(LoginFormView))
		.route(
			Method::POST,
			"/login",
			Arc::new(LoginView::new(state.clone())),
		)
		.route(
			Method::POST,
			"/logout",
			Arc::new(LogoutView::new(state.clone())),
		)
		.route(Method::GET, "/admin", Arc::new(AdminPanelView))
		.route(
			Method::GET,
			"/admin/api/data",
			Arc::new(AdminDataView::new(state.clone())),
		)
		.route(
			Method::POST,
			"/admin/api/skills",
			Arc::new(SkillCreateView::new(state.clone())),
		)
		.route(
			Method::POST,
			"/admin/api/projects",
			Arc::new(ProjectCreateView::new(state.clone())),
		)
		.route(
			Method::POST,
			"/admin/api/experience",
			Arc::new(ExperienceCreateView::new(state.clone())),
		)
		.route(
			Method::DELETE,
			"/admin/api/{table}/{id}",
			Arc::new(AdminDeleteView::new(state.clone())),
		)
		.route(
			Method::PUT,
			"/admin/api/hero",
			Arc::new(HeroSaveView::new(state.clone())),
		)
		.route(
			Method::PUT,
			"/admin/api/about",
			Arc::new(AboutSaveView::new(state.clone())),
		)
		.route(
			Method::PUT,
			"/admin/api/contact",
			Arc::new(ContactSaveView::new(state.clone())),
		)
		.route(
			Method::GET,
			"/admin/api/events",
			Arc::new(EventsView::new(state.clone())),
		)
		.route(
			Method::POST,
			"/admin/api/upload",
			Arc::new(UploadView::new(state.clone())),
		)
		.route(
			Method::GET,
			"/media/{filename}",
			Arc::new(MediaView::new(state)),
		)
}

/// The composed application: routes behind the middleware stack
pub fn application(state: Arc<AppState>) -> Arc<dyn Handler> {
	let router = Arc::new(routes(state.clone()));
	Arc::new(
		MiddlewareChain::new(router)
			.with_middleware(Arc::new(RequestLogger))
			.with_middleware(Arc::new(AdminGuard::new(state))),
	)
}
