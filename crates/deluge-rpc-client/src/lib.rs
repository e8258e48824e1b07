//! # Deluge Web JSON-RPC client.
//!
//! A [`Session`] authenticates with the daemon's web UI password on creation,
//! carries the session cookie across calls and exposes a single
//! [`Session::invoke`] primitive. [`DelugeClient`] layers the typed
//! [`DelugeApi`](deluge_rpc_types::DelugeApi) operations on top.
//!
//! usage:
//!
//! ```rust,ignore
//! use deluge_rpc_client::{DelugeClient, SessionConfig};
//! use deluge_rpc_types::{DelugeApi, TorrentOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DelugeClient::connect(SessionConfig::from_env()).await?;
//!     let hash = client
//!         .add_torrent_magnet("magnet:?xt=urn:btih:...", &TorrentOptions::new())
//!         .await?;
//!     let torrent = client.get_torrent_status(&hash).await?;
//!     println!("Added torrent: {:?}", torrent);
//!     Ok(())
//! }
//! ```
//!

mod client;
mod cookies;
mod decode;
mod envelope;
mod ops;
mod session;

#[cfg(test)]
mod testutil;

#[cfg(test)]
use {axum as _, tracing_subscriber as _};

pub use client::DelugeClient;
pub use cookies::SessionCookie;
pub use envelope::ResponseEnvelope;
pub use session::{DEFAULT_ENDPOINT, DEFAULT_PASSWORD, DEFAULT_TIMEOUT, Session, SessionConfig};
