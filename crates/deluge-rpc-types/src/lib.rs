//! # Deluge RPC Types
//!
//! This crate defines the error taxonomy, the torrent status records and the
//! [`DelugeApi`] trait shared by clients of the Deluge Web JSON-RPC API.

use std::collections::HashMap;

use serde_json::{Map, Value};

mod error;
mod torrent;

pub use error::{DelugeError, RpcError, RpcErrorKind};
pub use torrent::{Torrent, TorrentFile, TorrentState, TorrentTracker, TrackerError};

/// Options passed to the `core.add_torrent_*` methods.
///
/// Valid keys are defined by the daemon (`download_location`, `add_paused`, ...);
/// the client forwards the map untouched.
pub type TorrentOptions = Map<String, Value>;

/// Filter passed to `core.get_torrents_status` (`state`, `label`, `id`, ...).
/// Forwarded untouched.
pub type FilterDict = Map<String, Value>;

/// DelugeApi defines the typed operations wrapped around the daemon's `core.*` methods.
#[allow(async_fn_in_trait)]
pub trait DelugeApi {
    /// Add a torrent from the contents of a `.torrent` file. `file_dump` is the
    /// base64 encoded file content. Returns the torrent hash.
    async fn add_torrent_file(
        &self,
        filename: &str,
        file_dump: &str,
        options: &TorrentOptions,
    ) -> Result<String, DelugeError>;
    /// Add a torrent from a magnet URI. Returns the torrent hash.
    async fn add_torrent_magnet(
        &self,
        magnet_uri: &str,
        options: &TorrentOptions,
    ) -> Result<String, DelugeError>;
    /// Add a torrent the daemon downloads from `url`. Returns the torrent hash.
    async fn add_torrent_url(
        &self,
        url: &str,
        options: &TorrentOptions,
    ) -> Result<String, DelugeError>;
    /// Get the status of a single torrent by hash.
    async fn get_torrent_status(&self, hash: &str) -> Result<Torrent, DelugeError>;
    /// Get the status of every torrent matching `filter`, keyed by hash.
    async fn get_torrents_status(
        &self,
        filter: &FilterDict,
    ) -> Result<HashMap<String, Torrent>, DelugeError>;
    /// Remove a torrent by hash. If `remove_data` is true, the downloaded data is deleted too.
    async fn remove_torrent(&self, hash: &str, remove_data: bool) -> Result<bool, DelugeError>;
}
