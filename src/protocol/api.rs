//! JSON shapes of the public Deezer API (`https://api.deezer.com/2.0`).
//!
//! Only the fields the resolver needs are modelled; everything else in the
//! responses is ignored.
//!
//! # Wire Format
//!
//! Track (`/track/{id}`, and the items of every track listing):
//! ```json
//! {
//!     "id": 3135556,
//!     "title": "Harder, Better, Faster, Stronger",
//!     "link": "https://www.deezer.com/track/3135556",
//!     "duration": 224,
//!     "artist": { "id": 27, "name": "Daft Punk" },
//!     "album": { "id": 302127, "cover_medium": "https://e-cdns-images.dzcdn.net/..." }
//! }
//! ```
//!
//! Page (`/artist/{id}/top`, `/search`, and the `tracks` of albums and
//! playlists):
//! ```json
//! {
//!     "data": [...],
//!     "total": 100,
//!     "next": "https://api.deezer.com/artist/27/top?index=5"
//! }
//! ```
//!
//! Errors are reported in-band, usually with `200 OK`:
//! ```json
//! {
//!     "error": { "type": "DataException", "message": "no data", "code": 800 }
//! }
//! ```

use std::time::Duration;

use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError, DurationSeconds};
use thiserror::Error;
use url::Url;

use crate::error::Error;

/// A track as returned by the public API.
///
/// `duration` is sent in whole seconds.
#[serde_as]
#[derive(Clone, Eq, PartialEq, Deserialize, Debug, Hash)]
pub struct Track {
    /// Negative for tracks uploaded by users.
    pub id: i64,
    pub title: String,
    pub link: Url,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub duration: Duration,
    #[serde(default)]
    pub isrc: Option<String>,
    #[serde(default)]
    pub artist: Option<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

/// Artist as embedded in a track.
#[derive(Clone, Eq, PartialEq, Deserialize, Debug, Hash)]
pub struct ArtistRef {
    pub name: String,
}

/// Album as embedded in a track.
#[serde_as]
#[derive(Clone, Eq, PartialEq, Deserialize, Debug, Hash)]
pub struct AlbumRef {
    /// 250x250 cover image. Missing or unparsable covers are dropped rather
    /// than failing the whole track.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub cover_medium: Option<Url>,
}

#[derive(Clone, Eq, PartialEq, Deserialize, Debug, Hash)]
pub struct Album {
    pub id: u64,
    pub title: String,
    pub tracks: Page<Track>,
}

#[derive(Clone, Eq, PartialEq, Deserialize, Debug, Hash)]
pub struct Playlist {
    pub id: u64,
    pub title: String,
    pub tracks: Page<Track>,
}

#[derive(Clone, Eq, PartialEq, Deserialize, Debug, Hash)]
pub struct Artist {
    pub id: u64,
    pub name: String,
}

/// One page of a listing. `next` is an absolute URL to the following page,
/// absent on the last one.
#[derive(Clone, Eq, PartialEq, Deserialize, Debug, Hash)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub next: Option<Url>,
}

/// Body of an in-band error response.
#[derive(Clone, Eq, PartialEq, Deserialize, Debug, Hash)]
pub struct ErrorResponse {
    pub error: ApiError,
}

/// Error reported by the API itself.
#[derive(Clone, Eq, PartialEq, Deserialize, Debug, Hash, Error)]
#[error("{message}")]
pub struct ApiError {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub code: Option<u64>,
}

impl ApiError {
    pub const QUOTA: u64 = 4;
    pub const PERMISSION: u64 = 200;
    pub const TOKEN_INVALID: u64 = 300;
    pub const PARAMETER: u64 = 500;
    pub const MISSING_PARAMETER: u64 = 501;
    pub const INVALID_QUERY: u64 = 600;
    pub const SERVICE_BUSY: u64 = 700;
    pub const DATA_NOT_FOUND: u64 = 800;
}

/// Maps the API's error codes onto error kinds, keeping the API's message.
impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        match e.code {
            Some(ApiError::DATA_NOT_FOUND) => Self::not_found(e),
            Some(ApiError::QUOTA) => Self::resource_exhausted(e),
            Some(ApiError::SERVICE_BUSY) => Self::unavailable(e),
            Some(ApiError::PERMISSION) => Self::permission_denied(e),
            Some(ApiError::TOKEN_INVALID) => Self::unauthenticated(e),
            Some(ApiError::PARAMETER | ApiError::MISSING_PARAMETER | ApiError::INVALID_QUERY) => {
                Self::invalid_argument(e)
            }
            _ => Self::unknown(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn track_with_missing_album_and_artist() {
        let track: Track = serde_json::from_str(
            r#"{"id": -12, "title": "Demo", "link": "https://www.deezer.com/track/-12", "duration": 61}"#,
        )
        .unwrap();
        assert_eq!(track.id, -12);
        assert_eq!(track.duration, Duration::from_secs(61));
        assert!(track.artist.is_none());
        assert!(track.album.is_none());
    }

    #[test]
    fn broken_cover_is_dropped() {
        let album: AlbumRef = serde_json::from_str(r#"{"cover_medium": "not a url"}"#).unwrap();
        assert!(album.cover_medium.is_none());
    }

    #[test]
    fn last_page_has_no_next() {
        let page: Page<Artist> =
            serde_json::from_str(r#"{"data": [{"id": 27, "name": "Daft Punk"}], "total": 1}"#).unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(page.next.is_none());
    }

    #[test]
    fn api_error_codes_map_to_kinds() {
        let body = r#"{"error": {"type": "DataException", "message": "no data", "code": 800}}"#;
        let response: ErrorResponse = serde_json::from_str(body).unwrap();
        let err = Error::from(response.error);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message(), "no data");

        let quota = ApiError {
            kind: "Exception".to_owned(),
            message: "Quota limit exceeded".to_owned(),
            code: Some(ApiError::QUOTA),
        };
        assert_eq!(Error::from(quota).kind, ErrorKind::ResourceExhausted);
    }
}
