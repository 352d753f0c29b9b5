use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use webchat::{config, gateway};

#[derive(Parser)]
#[command(name = "webchat")]
#[command(about = "A minimal web chat front end with server-side conversation history")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the chat page and API
    Serve {
        /// Port to bind to (overrides config file)
        #[arg(short, long, env = "WEBCHAT_PORT")]
        port: Option<u16>,

        /// Bind address (overrides config file)
        #[arg(short, long, env = "WEBCHAT_BIND")]
        bind: Option<String>,
    },

    /// Show version
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = config::load()?;
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(bind) = bind {
                config.gateway.bind = bind;
            }
            gateway::run(config).await
        }
        Commands::Status => {
            println!("webchat v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
