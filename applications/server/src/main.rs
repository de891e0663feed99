/// Device Config Server - device registry over HTTP
use clap::{Parser, Subcommand};
use deviceconfig_core::DeviceService;
use deviceconfig_server::{api, config::ServerConfig, state::AppState};
use deviceconfig_storage::SqliteDeviceStore;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "deviceconfig-server")]
#[command(about = "Device configuration registry server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "DEVICECONFIG_CONFIG")]
        config: Option<PathBuf>,
    },
    /// List all stored devices
    ListDevices {
        /// Configuration file path
        #[arg(short, long, env = "DEVICECONFIG_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "deviceconfig_server=info,deviceconfig_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::ListDevices { config } => {
            list_devices(config).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn open_service(config: &ServerConfig) -> anyhow::Result<DeviceService> {
    ensure_database_dir(&config.storage.database_url).await?;

    let pool = deviceconfig_storage::create_pool(&config.storage.database_url).await?;
    deviceconfig_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    Ok(DeviceService::new(Arc::new(SqliteDeviceStore::new(pool))))
}

/// Create the parent directory of a file-backed `SQLite` URL
async fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    tracing::info!("Starting Device Config Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let service = open_service(&config).await?;
    let app = api::create_router(AppState::new(Arc::new(service)));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_devices(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let service = open_service(&config).await?;

    let devices = service.find_all_devices().await?;

    println!("Devices:");
    for device in devices {
        println!("  {} - {} ({})", device.id(), device.name(), device.device_type());
    }

    Ok(())
}
