//! # Deluge control CLI
//!
//! ## Usage
//!
//! ```sh,ignore
//! DELUGE_URL=http://localhost:8112/json DELUGE_PASSWORD=deluge \
//!     cargo run --release -p deluge-ctl -- add-magnet 'magnet:?xt=urn:btih:...' -o add_paused=true
//! ```

use std::time::Duration;

use clap::Parser;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use deluge_rpc_client::{DelugeClient, SessionConfig};
use deluge_rpc_types::DelugeApi;

mod cli;

use cli::{Cli, CliConnectionOptions, Command, into_map};

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Layers the CLI overrides on top of the environment.
fn session_config(overrides: CliConnectionOptions) -> SessionConfig {
    let mut config = SessionConfig::from_env();
    if let Some(url) = overrides.url {
        config.endpoint = url;
    }
    if let Some(password) = overrides.password {
        config.password = password;
    }
    if let Some(secs) = overrides.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    config
}

/// Runs one subcommand and returns what to print.
async fn run(client: &DelugeClient, command: Command) -> Result<Value, Box<dyn std::error::Error>> {
    let output = match command {
        Command::AddFile { path, options } => {
            let hash = client
                .add_torrent_file_path(&path, &into_map(options))
                .await?;
            info!("Added {} as {hash}", path.display());
            Value::String(hash)
        }
        Command::AddMagnet { uri, options } => {
            let hash = client.add_torrent_magnet(&uri, &into_map(options)).await?;
            info!("Added magnet as {hash}");
            Value::String(hash)
        }
        Command::AddUrl { url, options } => {
            let hash = client.add_torrent_url(&url, &into_map(options)).await?;
            info!("Added {url} as {hash}");
            Value::String(hash)
        }
        Command::Status { hash } => serde_json::to_value(client.get_torrent_status(&hash).await?)?,
        Command::List { filters } => {
            serde_json::to_value(client.get_torrents_status(&into_map(filters)).await?)?
        }
        Command::Remove { hash, remove_data } => {
            Value::Bool(client.remove_torrent(&hash, remove_data).await?)
        }
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = session_config(cli.connection);
    info!("Connecting with {config:?}");

    let client = DelugeClient::connect(config).await.inspect_err(|e| {
        error!("Failed to connect: {e}");
    })?;

    let output = run(&client, cli.command).await.inspect_err(|e| {
        error!("Command failed: {e}");
    })?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
