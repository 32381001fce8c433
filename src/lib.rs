//! Single-operator portfolio site: a public marketing page, a
//! password-protected admin panel with live updates, and a small
//! media bucket, all served from one binary over SQLite.

pub mod auth;
pub mod conf;
pub mod db;
pub mod error;
pub mod fallback;
pub mod feed;
pub mod forms;
pub mod handler;
pub mod http;
pub mod middleware;
pub mod models;
pub mod multipart;
pub mod pages;
pub mod routing;
pub mod server;
pub mod state;
pub mod storage;
pub mod store;
pub mod urls;
pub mod views;

pub use error::{Error, Result};
pub use state::AppState;
