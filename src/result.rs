//! Outcome of a resolve call.
//!
//! A [`LoadResult`] serializes to the envelope hosts already understand:
//!
//! ```json
//! {
//!     "loadType": "PLAYLIST_LOADED",
//!     "tracks": [...],
//!     "playlistInfo": { "name": "Discovery" }
//! }
//! ```
//!
//! Failures carry an exception instead:
//!
//! ```json
//! {
//!     "loadType": "LOAD_FAILED",
//!     "tracks": [],
//!     "playlistInfo": {},
//!     "exception": { "message": "no data", "severity": "COMMON" }
//! }
//! ```

use std::fmt;

use serde::Serialize;

use crate::track::Track;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadType {
    TrackLoaded,
    PlaylistLoaded,
    SearchResult,
    NoMatches,
    LoadFailed,
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::TrackLoaded => "TRACK_LOADED",
            Self::PlaylistLoaded => "PLAYLIST_LOADED",
            Self::SearchResult => "SEARCH_RESULT",
            Self::NoMatches => "NO_MATCHES",
            Self::LoadFailed => "LOAD_FAILED",
        };
        f.write_str(s)
    }
}

/// How bad an exception is, from the host's point of view.
///
/// Upstream errors like missing data or an unreachable API are all
/// [`Common`](Self::Common).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    Common,
    Suspicious,
    Fault,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Exception {
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PlaylistInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    pub load_type: LoadType,
    pub tracks: Vec<Track>,
    pub playlist_info: PlaylistInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<Exception>,
}

impl LoadResult {
    #[must_use]
    pub fn track_loaded(track: Track) -> Self {
        Self::loaded(LoadType::TrackLoaded, vec![track], None)
    }

    #[must_use]
    pub fn playlist_loaded(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self::loaded(LoadType::PlaylistLoaded, tracks, Some(name.into()))
    }

    /// Search results, possibly empty.
    #[must_use]
    pub fn search_result(tracks: Vec<Track>) -> Self {
        Self::loaded(LoadType::SearchResult, tracks, None)
    }

    /// Nothing found. An empty message carries no exception.
    #[must_use]
    pub fn no_matches(message: impl Into<String>) -> Self {
        Self::failed(LoadType::NoMatches, message.into())
    }

    #[must_use]
    pub fn load_failed(message: impl Into<String>) -> Self {
        Self::failed(LoadType::LoadFailed, message.into())
    }

    fn loaded(load_type: LoadType, tracks: Vec<Track>, name: Option<String>) -> Self {
        Self {
            load_type,
            tracks,
            playlist_info: PlaylistInfo { name },
            exception: None,
        }
    }

    fn failed(load_type: LoadType, message: String) -> Self {
        let exception = (!message.is_empty()).then_some(Exception {
            message,
            severity: Severity::Common,
        });

        Self {
            load_type,
            tracks: Vec::new(),
            playlist_info: PlaylistInfo::default(),
            exception,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(
            self.load_type,
            LoadType::TrackLoaded | LoadType::PlaylistLoaded | LoadType::SearchResult
        )
    }

    #[must_use]
    pub fn playlist_name(&self) -> Option<&str> {
        self.playlist_info.name.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.exception.as_ref().map(|e| e.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_have_no_tracks() {
        let failed = LoadResult::load_failed("no data");
        assert_eq!(failed.load_type, LoadType::LoadFailed);
        assert!(failed.tracks.is_empty());
        assert_eq!(failed.message(), Some("no data"));
        assert!(!failed.is_loaded());

        let empty = LoadResult::no_matches("");
        assert_eq!(empty.load_type, LoadType::NoMatches);
        assert!(empty.exception.is_none());
    }

    #[test]
    fn serializes_host_envelope() {
        let json = serde_json::to_value(LoadResult::load_failed("no data")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "loadType": "LOAD_FAILED",
                "tracks": [],
                "playlistInfo": {},
                "exception": {"message": "no data", "severity": "COMMON"}
            })
        );

        let json = serde_json::to_value(LoadResult::playlist_loaded("Discovery", Vec::new())).unwrap();
        assert_eq!(json["loadType"], "PLAYLIST_LOADED");
        assert_eq!(json["playlistInfo"]["name"], "Discovery");
        assert!(json.get("exception").is_none());
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(LoadType::SearchResult.to_string(), "SEARCH_RESULT");
    }
}
