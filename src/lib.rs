//! Deezer source resolver for music-playback orchestration hosts.
//!
//! Turns Deezer links, share links and free-text queries into the host's
//! normalized tracks, using the public Deezer API. Start with
//! [`plugin::Deezer`] to install the resolver into a host, or use
//! [`resolver::DeezerResolver`] directly.
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[macro_use]
extern crate log;

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod link;
pub mod plugin;
pub mod protocol;
pub mod resolver;
pub mod result;
pub mod track;
