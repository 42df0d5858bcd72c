//! User Service - HTTP server for user management.

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::config::{UserServiceConfig, DEFAULT_PORT};
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management service")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "USER_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "USER_SERVICE_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = UserServiceConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => {
            let shutdown = CancellationToken::new();
            tokio::spawn(user_service_lib::shutdown_on_signal(shutdown.clone()));
            user_service_lib::run_server(config.with_addr(host, port), shutdown).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(config, migrate_action).await?;
        }
    }

    Ok(())
}

/// Initialize tracing (verbose mode sets debug level)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
