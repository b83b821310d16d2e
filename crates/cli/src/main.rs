use anyhow::Context;
use clap::{Parser, Subcommand};

use gametracker_kernel::settings::{Settings, StoreBackend};

#[derive(Debug, Parser)]
#[command(name = "gametracker", version, about = "GameTracker API server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Listen on this port instead of the configured one
        #[arg(long)]
        port: Option<u16>,
        /// Keep data in memory instead of MongoDB
        #[arg(long)]
        memory: bool,
    },
    /// Print the resolved settings and exit
    Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load GameTracker settings")?;

    match cli.command {
        Command::Serve { port, memory } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            if memory {
                settings.database.backend = StoreBackend::Memory;
            }

            gametracker_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = %settings.environment,
                backend = ?settings.database.backend,
                "gametracker CLI starting server"
            );
            gametracker_app::run(settings).await
        }
        Command::Settings => {
            println!("{:#?}", settings);
            Ok(())
        }
    }
}
