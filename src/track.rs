//! Tracks in the host's normalized representation.
//!
//! Every track coming out of the resolver is built by [`Track::from_remote`]
//! from a public API track. Tracks are not playable by themselves: the
//! `encoded` blob is left empty for the host's playback engine to fill in
//! when it looks the track up on its default platform.
//!
//! # Wire Format
//!
//! ```json
//! {
//!     "track": "",
//!     "info": {
//!         "identifier": "3135556",
//!         "isSeekable": true,
//!         "author": "Daft Punk",
//!         "length": 224000,
//!         "isStream": false,
//!         "title": "Harder, Better, Faster, Stronger",
//!         "uri": "https://www.deezer.com/track/3135556",
//!         "artworkUrl": "https://e-cdns-images.dzcdn.net/...",
//!         "isrc": "GBDUW0000059",
//!         "sourceName": "deezer"
//!     }
//! }
//! ```

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use url::Url;

use crate::protocol::api;

/// Opaque identity of whoever asked for a track, copied onto every track
/// produced for that request.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Requester(pub String);

impl fmt::Display for Requester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Requester {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub identifier: String,
    pub is_seekable: bool,
    pub author: String,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub length: Duration,
    pub is_stream: bool,
    pub title: String,
    pub uri: Url,
    pub artwork_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isrc: Option<String>,
    pub source_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Track {
    #[serde(rename = "track")]
    pub encoded: String,
    pub info: TrackInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<Requester>,
}

impl Track {
    /// Name the host knows this resolver's tracks by.
    pub const SOURCE_NAME: &'static str = "deezer";

    /// Author used when the API omits the artist.
    pub const UNKNOWN_AUTHOR: &'static str = "Unknown";

    /// Maps an API track. Deezer tracks are always seekable and never live
    /// streams.
    #[must_use]
    pub fn from_remote(remote: &api::Track, requester: Option<Requester>) -> Self {
        let author = remote
            .artist
            .as_ref()
            .map_or_else(|| Self::UNKNOWN_AUTHOR.to_owned(), |artist| artist.name.clone());
        let artwork_url = remote
            .album
            .as_ref()
            .and_then(|album| album.cover_medium.clone());

        Self {
            encoded: String::new(),
            info: TrackInfo {
                identifier: remote.id.to_string(),
                is_seekable: true,
                author,
                length: remote.duration,
                is_stream: false,
                title: remote.title.clone(),
                uri: remote.link.clone(),
                artwork_url,
                isrc: remote.isrc.clone(),
                source_name: Self::SOURCE_NAME.to_owned(),
            },
            requester,
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.info.identifier
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.info.author
    }

    #[must_use]
    pub fn length(&self) -> Duration {
        self.info.length
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.info.author, self.info.title)
    }
}
