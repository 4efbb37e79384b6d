use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use mueblegen::gateway::HttpGenerateClient;
use mueblegen::models::{Config, FurnitureType};
use mueblegen::server;
use mueblegen::studio::{StudioSession, ViewState};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "mueblegen")]
#[command(about = "Visualize industrial furniture concepts with generative AI")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP proxy in front of the image provider.
    Serve {
        /// Port to listen on (overrides PORT).
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate a single concept image through a running server.
    Generate {
        /// Furniture category to render.
        #[arg(long, value_enum, default_value_t = FurnitureType::Table)]
        furniture_type: FurnitureType,
        /// Free-text description, embedded verbatim in the prompt.
        #[arg(long)]
        description: Option<String>,
        /// Write the decoded image here instead of printing the data URI.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Base URL of the proxy server (overrides SERVER_URL).
        #[arg(long)]
        server_url: Option<String>,
    },
}

/// Strip the data-URI prefix and write the decoded bytes to `path`.
fn save_data_uri(image: &str, path: &Path) -> Result<()> {
    use base64::Engine as _;

    let encoded = image.rsplit_once(',').map(|(_, data)| data).unwrap_or(image);
    let bytes = base64::engine::general_purpose::STANDARD.decode(encoded)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mueblegen=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let mut config = Config::from_env()?;

    match args.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            info!("Starting mueblegen server");
            server::run(config).await?;
        }
        Command::Generate {
            furniture_type,
            description,
            output,
            server_url,
        } => {
            let server_url = server_url.unwrap_or(config.server_url);
            let gateway = HttpGenerateClient::new(&server_url);

            let mut session = StudioSession::new();
            session.set_furniture_type(furniture_type);
            if let Some(description) = description {
                session.set_description(description);
            }

            info!(
                "Generating a {} concept via {}",
                session.furniture_type(),
                server_url
            );

            match session.generate(&gateway).await {
                ViewState::Success { image } => {
                    if let Some(path) = output {
                        save_data_uri(image, &path)?;
                        info!("Saved image to {}", path.display());
                    } else {
                        println!("{}", image);
                    }
                }
                ViewState::Failed { message } => {
                    error!("Generation failed: {}", message);
                    std::process::exit(1);
                }
                // A fresh session always finishes in a terminal state.
                ViewState::Idle | ViewState::Loading => {}
            }
        }
    }

    Ok(())
}
