//! Typed facade over the daemon's `core.*` methods.

use std::{collections::HashMap, path::Path};

use base64::prelude::{BASE64_STANDARD, Engine as _};
use serde_json::{Value, json};
use tracing::debug;

use deluge_rpc_types::{DelugeApi, DelugeError, FilterDict, Torrent, TorrentOptions};

use crate::decode::decode_result;
use crate::ops::{self, RpcOps};
use crate::session::{Session, SessionConfig};


const ADD_TORRENT_FILE: &str = "core.add_torrent_file";
const ADD_TORRENT_MAGNET: &str = "core.add_torrent_magnet";
const ADD_TORRENT_URL: &str = "core.add_torrent_url";
const GET_TORRENT_STATUS: &str = "core.get_torrent_status";
const GET_TORRENTS_STATUS: &str = "core.get_torrents_status";
const REMOVE_TORRENT: &str = "core.remove_torrent";

/// DelugeClient wraps an authenticated [`Session`] with typed calls.
#[derive(Debug)]
#[allow(private_bounds)]
pub struct DelugeClient<T: RpcOps = Session> {
    session: T,
}

impl DelugeClient {
    /// Create a new DelugeClient.
    ///
    /// This method is async as the session authenticates on creation.
    pub async fn connect(config: SessionConfig) -> Result<Self, DelugeError> {
        debug!("Connecting to Deluge with {config:?}");
        let session = Session::connect(config).await?;
        debug!("Connected to Deluge");
        Ok(Self { session })
    }

    /// Wraps an already authenticated session.
    pub fn from_session(session: Session) -> Self {
        Self { session }
    }
}

#[allow(private_bounds)]
impl<T: RpcOps> DelugeClient<T> {
    /// Create a DelugeClient with a custom invoke backend.
    /// This is primarily useful for testing with mocks.
    #[cfg(test)]
    pub(crate) fn with_client(session: T) -> Self {
        Self { session }
    }

    /// The underlying session, for methods the facade does not wrap.
    pub fn session(&self) -> &T {
        &self.session
    }

    /// Reads a `.torrent` file from disk and adds it under its file name.
    pub async fn add_torrent_file_path(
        &self,
        path: impl AsRef<Path>,
        options: &TorrentOptions,
    ) -> Result<String, DelugeError> {
        let path = path.as_ref();
        debug!("Reading torrent file {}", path.display());
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| DelugeError::FileSystem(format!("{}: {e}", path.display())))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                DelugeError::FileSystem(format!("{} has no file name", path.display()))
            })?;

        self.add_torrent_file(&filename, &BASE64_STANDARD.encode(content), options)
            .await
    }
}

#[allow(private_bounds)]
impl<T: RpcOps> DelugeApi for DelugeClient<T> {
    async fn add_torrent_file(
        &self,
        filename: &str,
        file_dump: &str,
        options: &TorrentOptions,
    ) -> Result<String, DelugeError> {
        debug!("Adding torrent from file: {filename}");
        let hash: String = ops::call(
            &self.session,
            ADD_TORRENT_FILE,
            vec![json!(filename), json!(file_dump), Value::Object(options.clone())],
        )
        .await?;
        debug!("Added {hash}");
        Ok(hash)
    }

    async fn add_torrent_magnet(
        &self,
        magnet_uri: &str,
        options: &TorrentOptions,
    ) -> Result<String, DelugeError> {
        debug!("Adding torrent from magnet: {magnet_uri}");
        let hash: String = ops::call(
            &self.session,
            ADD_TORRENT_MAGNET,
            vec![json!(magnet_uri), Value::Object(options.clone())],
        )
        .await?;
        debug!("Added {hash}");
        Ok(hash)
    }

    async fn add_torrent_url(
        &self,
        url: &str,
        options: &TorrentOptions,
    ) -> Result<String, DelugeError> {
        debug!("Adding torrent from url: {url}");
        let hash: String = ops::call(
            &self.session,
            ADD_TORRENT_URL,
            vec![json!(url), Value::Object(options.clone())],
        )
        .await?;
        debug!("Added {hash}");
        Ok(hash)
    }

    async fn get_torrent_status(&self, hash: &str) -> Result<Torrent, DelugeError> {
        debug!("Getting status of torrent {hash}");
        let response = self
            .session
            .invoke(GET_TORRENT_STATUS, vec![json!(hash), json!([])])
            .await?;

        // The daemon answers an unknown hash with an empty dict.
        let result = response.into_result();
        if result.as_object().is_some_and(|o| o.is_empty()) {
            return Err(DelugeError::UnknownTorrent(hash.to_owned()));
        }

        let torrent: Torrent = decode_result(GET_TORRENT_STATUS, result)?;
        debug!("Status of torrent {hash}: {torrent:?}");
        Ok(torrent)
    }

    async fn get_torrents_status(
        &self,
        filter: &FilterDict,
    ) -> Result<HashMap<String, Torrent>, DelugeError> {
        debug!("Listing torrents matching {filter:?}");
        let torrents: HashMap<String, Torrent> = ops::call(
            &self.session,
            GET_TORRENTS_STATUS,
            vec![Value::Object(filter.clone()), json!([])],
        )
        .await?;
        debug!("Found {} torrents", torrents.len());
        Ok(torrents)
    }

    async fn remove_torrent(&self, hash: &str, remove_data: bool) -> Result<bool, DelugeError> {
        debug!("Removing torrent {hash}, remove_data={remove_data}");
        let removed: bool = ops::call(
            &self.session,
            REMOVE_TORRENT,
            vec![json!(hash), json!(remove_data)],
        )
        .await?;
        debug!("Remove returned {removed}");
        Ok(removed)
    }
}
