use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use menulinx::auth::issue_admin_token;
use menulinx::config::ServerConfig;
use menulinx::notify::SmsNotifier;
use menulinx::server::{AppState, create_router};
use menulinx::service::{KeyLocks, Restaurants};
use menulinx::store::{KvStore, SqliteStore};

#[derive(Parser)]
#[command(name = "menulinx")]
#[command(about = "A multi-tenant restaurant ordering server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// TOML config file; flags given on the command line take precedence
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// SMS gateway endpoint for order notifications
        #[arg(long)]
        sms_endpoint: Option<String>,
    },

    /// Delete expired order records and stats buckets
    Purge {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Issue a new admin token for a restaurant, revoking the previous one
    Token {
        /// Restaurant slug
        slug: String,

        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,
    },
}

fn open_store(data_dir: &std::path::Path) -> anyhow::Result<SqliteStore> {
    fs::create_dir_all(data_dir)?;
    let config = ServerConfig {
        data_dir: data_dir.to_path_buf(),
        ..ServerConfig::default()
    };
    Ok(SqliteStore::open(config.db_path())?)
}

fn run_admin_token(slug: &str, data_dir: &std::path::Path) -> anyhow::Result<()> {
    let store: Arc<dyn KvStore> = Arc::new(open_store(data_dir)?);
    let restaurants = Restaurants::new(store.clone(), Arc::new(KeyLocks::new()));

    if restaurants.get(slug)?.is_none() {
        bail!("Restaurant '{slug}' does not exist");
    }

    let raw_token = issue_admin_token(store.as_ref(), slug)?;

    println!();
    println!("========================================");
    println!("Admin token for '{slug}' (save this, it won't be shown again):");
    println!();
    println!("  {raw_token}");
    println!();
    println!("========================================");
    println!();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("menulinx=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Token { slug, data_dir } => {
                run_admin_token(&slug, &data_dir)?;
            }
        },
        Commands::Purge { data_dir } => {
            let store = open_store(&data_dir)?;
            let purged = store.purge_expired()?;
            println!("Purged {purged} expired key(s)");
        }
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
            sms_endpoint,
        } => {
            let mut config = match config {
                Some(path) => ServerConfig::from_file(&path)?,
                None => ServerConfig::default(),
            };
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            if let Some(sms_endpoint) = sms_endpoint {
                config.sms_endpoint = sms_endpoint;
            }

            let store = open_store(&config.data_dir)?;
            let purged = store.purge_expired()?;
            if purged > 0 {
                info!("Purged {purged} expired key(s) at startup");
            }

            let state = Arc::new(AppState::new(
                Arc::new(store),
                Arc::new(SmsNotifier::new(config.sms_endpoint.clone())),
            ));

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
