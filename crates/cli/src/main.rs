use anyhow::Context;
use clap::{Parser, Subcommand};
use playground_kernel::settings::Settings;

/// HTTP playground: an in-memory API for learning HTTP
#[derive(Debug, Parser)]
#[command(name = "playground", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Interface to bind, overriding configuration
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overriding configuration
        #[arg(long, short)]
        port: Option<u16>,
    },
    /// Print every endpoint the server exposes
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings =
        Settings::load().with_context(|| "failed to load playground settings")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            playground_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "playground CLI serving");
            playground_app::run(settings).await
        }
        Command::Routes => {
            let app = playground_app::App::new(&settings)?;
            for endpoint in app.registry.endpoints() {
                println!("{:<7} {:<24} {}", endpoint.method, endpoint.full_path(), endpoint.summary);
            }
            Ok(())
        }
    }
}
