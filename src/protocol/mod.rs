//! Wire types and parsing for the public Deezer API.
//!
//! * [`api`] - JSON shapes of tracks, albums, playlists, artists and pages
//!
//! Responses are parsed through [`json`], which logs what it parsed so that
//! API changes can be diagnosed from a trace log.

pub mod api;

use crate::error::Result;
use serde::Deserialize;
use std::fmt::Debug;

/// Parses and logs a JSON response body.
///
/// # Errors
///
/// Returns error if the body is not valid JSON or does not match `T`.
///
/// # Logging
///
/// * Success: parsed structure at TRACE level
/// * Shape mismatch: raw JSON at TRACE level
/// * Invalid JSON: error at ERROR level, raw text at TRACE level
pub fn json<T>(body: &str, origin: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Debug,
{
    match serde_json::from_str(body) {
        Ok(result) => {
            trace!("{origin}: {result:#?}");
            Ok(result)
        }
        Err(e) => {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
                trace!("{origin}: {json:#?}");
            } else {
                error!("{origin}: failed parsing response ({e:?})");
                trace!("{body}");
            }
            Err(e.into())
        }
    }
}
