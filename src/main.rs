use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubedash::api::{self, AppState};
use tubedash::config::Config;
use tubedash::db::Database;
use tubedash::youtube::YouTubeClient;

#[derive(Parser)]
#[command(name = "tubedash")]
#[command(about = "Companion dashboard backend for YouTube videos, comments and notes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Run database migrations and exit
    Migrate {
        /// SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Port for HTTP API
    #[arg(short, long)]
    port: Option<u16>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// SQLite database file
    #[arg(long)]
    database: Option<PathBuf>,

    /// YouTube Data API base URL
    #[arg(long)]
    api_url: Option<String>,
}

impl ServeArgs {
    fn apply(self, mut config: Config) -> Config {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(database) = self.database {
            config.database = Some(database);
        }
        if let Some(api_url) = self.api_url {
            config.youtube_api_url = api_url;
        }
        config
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "tubedash=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_database(path: Option<PathBuf>) -> anyhow::Result<Database> {
    let db = match path {
        Some(path) => Database::open(path)?,
        None => Database::open_default()?,
    };
    db.migrate().context("Failed to run migrations")?;
    Ok(db)
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let db = open_database(config.database.clone())?;
    let (notes, events) = (db.count_notes()?, db.count_events()?);
    tracing::info!(notes, events, "Database ready");

    let youtube = YouTubeClient::new(&config.youtube_api_url, config.request_timeout)?;
    tracing::info!("Proxying YouTube API at {}", youtube.base_url());

    let app = api::create_router(AppState::new(db, youtube), config.cors_origins.as_deref());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("tubedash listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_env();

    match cli.command {
        Some(Commands::Serve(args)) => serve(args.apply(config)).await?,
        Some(Commands::Migrate { database }) => {
            open_database(database.or(config.database))?;
            tracing::info!("Migrations complete");
        }
        None => serve(config).await?,
    }

    Ok(())
}
