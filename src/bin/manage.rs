use clap::{Parser, Subcommand};

use folio::conf::Settings;
use folio::server::Server;
use folio::urls;
use folio::AppState;

#[derive(Parser)]
#[command(name = "manage", about = "Portfolio site management commands")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Start the web server
	Runserver,
	/// Validate the configuration and exit
	Check,
	/// Hash a password for FOLIO_ADMIN_PASSWORD_HASH
	HashPassword {
		/// The password to hash
		password: String,
	},
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	let cli = Cli::parse();

	match cli.command {
		Command::Runserver => {
			let settings = Settings::from_env()?;
			let addr = settings.bind_addr;
			let state = AppState::from_settings(settings).await?;
			let app = urls::application(state);
			Server::new(addr, app).run().await?;
		}
		Command::Check => {
			let settings = Settings::from_env()?;
			println!("bind address:      {}", settings.bind_addr);
			println!(
				"database:          {}",
				settings.database_url.as_deref().unwrap_or("(placeholder mode)")
			);
			println!("media root:        {}", settings.media_root);
			println!(
				"admin credentials: {}",
				if settings.has_admin_credentials() {
					"configured"
				} else {
					"missing"
				}
			);
			println!(
				"page cache:        {}",
				if settings.page_cache_ttl.is_zero() {
					"disabled".to_string()
				} else {
					format!("{}s", settings.page_cache_ttl.as_secs())
				}
			);
		}
		Command::HashPassword { password } => {
			println!("{}", folio::auth::hash_password(&password)?);
		}
	}

	Ok(())
}
