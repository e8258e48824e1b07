//! Torrent status records as returned by `core.get_torrent_status` and
//! `core.get_torrents_status`.
//!
//! Decoding is field-for-field by name. Unknown fields are ignored, required fields
//! must be present, and any field that is present must have the declared type.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle state reported by the daemon in the `state` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[allow(missing_docs)]
pub enum TorrentState {
    Allocating,
    Checking,
    Downloading,
    Seeding,
    Paused,
    Error,
    Queued,
    Moving,
    /// A state string this client does not know about.
    Other(String),
}

impl TorrentState {
    /// The state as the daemon spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Allocating => "Allocating",
            Self::Checking => "Checking",
            Self::Downloading => "Downloading",
            Self::Seeding => "Seeding",
            Self::Paused => "Paused",
            Self::Error => "Error",
            Self::Queued => "Queued",
            Self::Moving => "Moving",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for TorrentState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Allocating" => Self::Allocating,
            "Checking" => Self::Checking,
            "Downloading" => Self::Downloading,
            "Seeding" => Self::Seeding,
            "Paused" => Self::Paused,
            "Error" => Self::Error,
            "Queued" => Self::Queued,
            "Moving" => Self::Moving,
            _ => Self::Other(value),
        }
    }
}

impl From<TorrentState> for String {
    fn from(value: TorrentState) -> Self {
        match value {
            TorrentState::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for TorrentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file contained in a torrent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct TorrentFile {
    pub index: i64,
    pub path: String,
    pub offset: i64,
    pub size: i64,
}

/// Last error reported by a tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct TrackerError {
    pub category: String,
    pub value: i64,
}

/// Tracker information for a torrent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)] // rationale: these are the same fields as in the daemon's status dict
pub struct TorrentTracker {
    pub url: String,

    pub tier: i64,

    pub send_stats: Option<bool>,

    pub fails: Option<i64>,

    pub fail_limit: Option<i64>,

    pub verified: Option<bool>,

    pub source: Option<i64>,

    pub message: Option<String>,

    pub trackerid: Option<String>,

    pub updating: Option<bool>,

    pub start_sent: Option<bool>,

    pub complete_sent: Option<bool>,

    pub scrape_complete: Option<i64>,

    pub scrape_incomplete: Option<i64>,

    pub scrape_downloaded: Option<i64>,

    pub last_error: Option<TrackerError>,

    // Shape differs across libtorrent versions.
    pub min_announce: Option<Value>,

    pub next_announce: Option<Value>,
}

/// Torrent status.
///
/// `hash`, `name`, `state`, `progress`, `total_size` and `total_done` are required;
/// everything else may be absent or null, since the daemon only returns the keys it
/// was asked for and older daemons lack some of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Torrent {
    pub hash: String,

    pub name: String,

    pub state: TorrentState,

    pub progress: f64,

    pub total_size: i64,

    pub total_done: i64,

    pub comment: Option<String>,

    pub active_time: Option<i64>,

    pub is_seed: Option<bool>,

    pub is_finished: Option<bool>,

    pub is_auto_managed: Option<bool>,

    pub paused: Option<bool>,

    pub private: Option<bool>,

    pub compact: Option<bool>,

    pub message: Option<String>,

    pub label: Option<String>,

    pub tracker: Option<String>,

    pub tracker_host: Option<String>,

    pub tracker_status: Option<String>,

    pub save_path: Option<String>,

    pub move_completed: Option<bool>,

    pub move_completed_path: Option<String>,

    pub move_on_completed: Option<bool>,

    pub move_on_completed_path: Option<String>,

    pub upload_payload_rate: Option<i64>,

    pub download_payload_rate: Option<i64>,

    pub total_payload_upload: Option<i64>,

    pub total_payload_download: Option<i64>,

    pub total_uploaded: Option<i64>,

    pub total_wanted: Option<i64>,

    pub all_time_download: Option<i64>,

    pub seed_rank: Option<i64>,

    pub seeding_time: Option<i64>,

    pub max_upload_slots: Option<i64>,

    pub max_upload_speed: Option<f64>,

    pub max_download_speed: Option<f64>,

    pub max_connections: Option<i64>,

    pub prioritize_first_last: Option<bool>,

    pub distributed_copies: Option<f64>,

    pub ratio: Option<f64>,

    pub stop_at_ratio: Option<bool>,

    pub stop_ratio: Option<f64>,

    pub remove_at_ratio: Option<bool>,

    pub seeds_peers_ratio: Option<f64>,

    pub num_peers: Option<i64>,

    pub total_peers: Option<i64>,

    pub num_seeds: Option<i64>,

    pub total_seeds: Option<i64>,

    pub num_pieces: Option<i64>,

    pub piece_length: Option<i64>,

    pub num_files: Option<i64>,

    pub next_announce: Option<i64>,

    pub queue: Option<i64>,

    pub eta: Option<i64>,

    pub time_added: Option<f64>,

    pub file_priorities: Option<Vec<i64>>,

    pub file_progress: Option<Vec<f64>>,

    pub files: Option<Vec<TorrentFile>>,

    pub trackers: Option<Vec<TorrentTracker>>,

    pub peers: Option<Vec<Value>>,
}
