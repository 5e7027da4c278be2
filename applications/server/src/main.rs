/// Shelf Server - multi-user media catalogue service
use clap::{Parser, Subcommand};
use shelf_server::{api, config::ServerConfig, state::AppState};
use shelf_storage::LocalStorageContext;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelf-server")]
#[command(about = "Shelf media catalogue server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "SHELF_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Apply database migrations and exit
    Migrate {
        /// Configuration file path
        #[arg(short, long, env = "SHELF_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shelf_server=info,shelf_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::Migrate { config } => {
            migrate(config.as_deref()).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

async fn serve(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting Shelf Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = shelf_storage::create_pool(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    shelf_storage::run_migrations(&pool).await?;

    let storage = Arc::new(LocalStorageContext::new(pool));
    tracing::info!("Database connected");

    let app_state = AppState::new(storage);
    let app = api::router(app_state).layer(config.cors.layer()?);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn migrate(config_path: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let pool = shelf_storage::create_pool(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    shelf_storage::run_migrations(&pool).await?;

    tracing::info!(database_url = %config.storage.database_url, "Migrations complete");

    Ok(())
}
