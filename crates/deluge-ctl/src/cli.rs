use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Connection overrides. Anything not given is read from the environment.
    #[command(flatten)]
    pub connection: CliConnectionOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI representation of the session settings.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct CliConnectionOptions {
    /// URL of the JSON endpoint (overrides DELUGE_URL).
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Web UI password (overrides DELUGE_PASSWORD).
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Per-request timeout in seconds (overrides DELUGE_TIMEOUT_SECS).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Add a torrent from a local .torrent file.
    AddFile {
        /// Path to the .torrent file.
        path: PathBuf,
        /// Add option as KEY=VALUE, may be repeated.
        #[arg(short, long = "option", value_parser = parse_key_value)]
        options: Vec<(String, Value)>,
    },
    /// Add a torrent from a magnet URI.
    AddMagnet {
        /// The magnet URI.
        uri: String,
        /// Add option as KEY=VALUE, may be repeated.
        #[arg(short, long = "option", value_parser = parse_key_value)]
        options: Vec<(String, Value)>,
    },
    /// Add a torrent the daemon downloads from a URL.
    AddUrl {
        /// URL of the .torrent file.
        url: String,
        /// Add option as KEY=VALUE, may be repeated.
        #[arg(short, long = "option", value_parser = parse_key_value)]
        options: Vec<(String, Value)>,
    },
    /// Show the status of one torrent.
    Status {
        /// Torrent hash.
        hash: String,
    },
    /// List torrents, optionally filtered.
    List {
        /// Filter as KEY=VALUE (e.g. state=Seeding), may be repeated.
        #[arg(short, long = "filter", value_parser = parse_key_value)]
        filters: Vec<(String, Value)>,
    },
    /// Remove a torrent.
    Remove {
        /// Torrent hash.
        hash: String,
        /// Also delete the downloaded data.
        #[arg(long, default_value_t = false)]
        remove_data: bool,
    },
}

/// Parses `KEY=VALUE`. The value is taken as JSON when it parses as JSON and as a
/// plain string otherwise, so `add_paused=true` is a boolean and `label=tv` a string.
pub(crate) fn parse_key_value(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
    Ok((key.to_owned(), value))
}

/// Collects parsed pairs into the map sent to the daemon. Later keys win.
pub(crate) fn into_map(pairs: Vec<(String, Value)>) -> Map<String, Value> {
    pairs.into_iter().collect()
}
