mod common;

use common::{body_string, TestApp};
use folio::forms::{HeroPayload, ContactSettingsPayload};
use folio::http::Request;
use hyper::{Method, StatusCode};

#[tokio::test]
async fn home_page_renders_for_anonymous_visitors() {
	let app = TestApp::new().await;
	let response = app.request(Request::builder().uri("/").build()).await;

	assert_eq!(response.status, StatusCode::OK);
	let html = body_string(&response);
	assert!(html.contains("<form method=\"post\" action=\"/contact\""));
}

#[tokio::test]
async fn home_page_reflects_saved_hero_content() {
	let app = TestApp::new().await;
	app.state
		.require_store()
		.unwrap()
		.save_hero(
			HeroPayload {
				greeting: "Hello".into(),
				name: "Grace Hopper".into(),
				role_text: "Rear Admiral of Compilers".into(),
				headline_prefix: "Compiling".into(),
				headline_highlight: "Ideas".into(),
				headline_suffix: "into Machines.".into(),
				description: "Compilers and more".into(),
				resume_url: None,
			},
			ContactSettingsPayload {
				email: "grace@example.com".into(),
				phone: None,
				address: None,
				github_url: None,
				linkedin_url: None,
				twitter_url: None,
			},
		)
		.await
		.unwrap();

	let response = app.request(Request::builder().uri("/").build()).await;
	let html = body_string(&response);
	assert!(html.contains("Grace Hopper"));
	assert!(html.contains("grace@example.com"));
}

#[tokio::test]
async fn contact_form_stores_the_message_and_redirects() {
	let app = TestApp::new().await;
	let response = app
		.request(
			Request::builder()
				.method(Method::POST)
				.uri("/contact")
				.form_body(&[
					("name", "Visitor"),
					("email", "visitor@example.com"),
					("message", "I would like to hire you"),
				])
				.build(),
		)
		.await;

	assert_eq!(response.status, StatusCode::SEE_OTHER);
	assert_eq!(
		response.headers.get("location").unwrap().to_str().unwrap(),
		"/?sent=1#contact"
	);

	let messages = app
		.state
		.require_store()
		.unwrap()
		.list_messages()
		.await
		.unwrap();
	assert_eq!(messages.len(), 1);
	assert_eq!(messages[0].email, "visitor@example.com");

	// Following the redirect shows the thank-you note.
	let response = app.request(Request::builder().uri("/?sent=1").build()).await;
	assert!(body_string(&response).contains("Thanks for reaching out"));
}

#[tokio::test]
async fn invalid_contact_submission_keeps_the_visitor_on_the_page() {
	let app = TestApp::new().await;
	let response = app
		.request(
			Request::builder()
				.method(Method::POST)
				.uri("/contact")
				.form_body(&[("name", ""), ("email", "visitor@example.com"), ("message", "Hi")])
				.build(),
		)
		.await;

	assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
	let html = body_string(&response);
	assert!(html.contains("name"));
	assert!(html.contains("/contact"));
}

#[tokio::test]
async fn unknown_paths_render_a_404_page() {
	let app = TestApp::new().await;
	let response = app
		.request(Request::builder().uri("/definitely-not-here").build())
		.await;
	assert_eq!(response.status, StatusCode::NOT_FOUND);
}
