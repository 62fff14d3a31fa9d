//! User Service - HTTP server for enriched user records and friendships.

use clap::{Parser, Subcommand};

use common::init_tracing;
use user_service_lib::config::UserServiceConfig;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User enrichment and friendship service")]
struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "HTTP_ADDRESS")]
        host: Option<String>,
        #[arg(long, env = "HTTP_PORT")]
        port: Option<u16>,
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
    let mut config = UserServiceConfig::from_env();

    init_tracing(config.environment, cli.verbose);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            user_service_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(migrate_action, config).await?;
        }
    }

    Ok(())
}
