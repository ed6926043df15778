//! Turning queries into load results.
//!
//! [`Resolver`] is the extension point hosts call for every query. Resolvers
//! form a chain: [`DeezerResolver`] handles what it recognizes and hands
//! everything else to the next resolver in the chain, usually the host's own
//! default resolver.
//!
//! # Dispatch
//!
//! In order of precedence:
//!
//! 1. Share links (`https://deezer.page.link/...`) are expanded by one
//!    redirect hop and, if they land on a canonical link, resolved again.
//! 2. `dzisrc:<ISRC>` queries load a single track by ISRC.
//! 3. Queries with source `deezer` that are not canonical links are
//!    searched as free text.
//! 4. Canonical track, album, playlist and artist links are loaded.
//! 5. Anything else is delegated with the host's default platform as source.
//!
//! # Failures
//!
//! Upstream failures never reach the host as errors. Loading a link fails
//! with `LOAD_FAILED`, while a failed search reports `NO_MATCHES`: not
//! finding anything is the expected outcome of a bad search.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    api::Api,
    config::Config,
    error::Result,
    http::{self, Transport},
    link::{self, Kind, ResolvedUrl},
    protocol::api,
    result::LoadResult,
    track::{Requester, Track},
};

/// What the host asks to resolve.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Query {
    /// Link or free text.
    pub text: String,

    /// Platform the host wants the text looked up on, such as `deezer`.
    pub source: Option<String>,

    pub requester: Option<Requester>,
}

impl Query {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_requester(mut self, requester: impl Into<Requester>) -> Self {
        self.requester = Some(requester.into());
        self
    }
}

#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolves a query into tracks.
    ///
    /// # Errors
    ///
    /// Implementations report lookup failures as `LOAD_FAILED` or
    /// `NO_MATCHES` results. Errors are reserved for failures of the
    /// resolver itself.
    async fn resolve(&self, query: Query) -> Result<LoadResult>;
}

/// Where unrecognized queries go.
#[derive(Clone)]
pub struct Fallback {
    pub resolver: Arc<dyn Resolver>,

    /// Source substituted into delegated queries.
    pub default_platform: Option<String>,
}

pub struct DeezerResolver {
    api: Api,
    share_link_prefix: String,
    canonical_prefix: String,
    fallback: Option<Fallback>,
}

impl DeezerResolver {
    /// Exception message for artists without any top tracks.
    pub const NO_TOP_SONGS: &'static str = "This artist does not have any top songs";

    #[must_use]
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            api: Api::new(config, transport),
            share_link_prefix: config.share_link_prefix.clone(),
            canonical_prefix: config.canonical_prefix.clone(),
            fallback: None,
        }
    }

    /// Creates a resolver talking to the network through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn with_client(config: &Config) -> Result<Self> {
        let client = http::Client::new(config)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// Delegates unrecognized queries to `resolver`, with their source
    /// replaced by `default_platform`.
    #[must_use]
    pub fn with_fallback(mut self, resolver: Arc<dyn Resolver>, default_platform: Option<String>) -> Self {
        self.fallback = Some(Fallback {
            resolver,
            default_platform,
        });
        self
    }

    #[must_use]
    pub fn api(&self) -> &Api {
        &self.api
    }

    fn is_deezer_source(source: Option<&str>) -> bool {
        source.is_some_and(|source| source.eq_ignore_ascii_case(Track::SOURCE_NAME))
    }

    fn tracks(remote: &[api::Track], requester: Option<&Requester>) -> Vec<Track> {
        remote
            .iter()
            .map(|track| Track::from_remote(track, requester.cloned()))
            .collect()
    }

    /// Loads the content a canonical link points to.
    ///
    /// Failures are reported as `LOAD_FAILED`, with the API's own error
    /// message when it sent one.
    pub async fn load(&self, resolved: &ResolvedUrl, requester: Option<&Requester>) -> LoadResult {
        let ResolvedUrl { kind, id } = resolved;
        let result = match kind {
            Kind::Track => self.load_track(id, requester).await,
            Kind::Album => self.load_album(id, requester).await,
            Kind::Playlist => self.load_playlist(id, requester).await,
            Kind::Artist => self.load_artist(id, requester).await,
        };

        result.unwrap_or_else(|e| {
            warn!("failed loading {kind} {id}: {e}");
            LoadResult::load_failed(e.message())
        })
    }

    async fn load_track(&self, id: &str, requester: Option<&Requester>) -> Result<LoadResult> {
        let track = self.api.track(id).await?;
        Ok(LoadResult::track_loaded(Track::from_remote(&track, requester.cloned())))
    }

    async fn load_album(&self, id: &str, requester: Option<&Requester>) -> Result<LoadResult> {
        let album = self.api.album(id).await?;
        let tracks = Self::tracks(&album.tracks.data, requester);
        Ok(LoadResult::playlist_loaded(album.title, tracks))
    }

    async fn load_playlist(&self, id: &str, requester: Option<&Requester>) -> Result<LoadResult> {
        let playlist = self.api.playlist(id).await?;
        let tracks = Self::tracks(&playlist.tracks.data, requester);
        Ok(LoadResult::playlist_loaded(playlist.title, tracks))
    }

    async fn load_artist(&self, id: &str, requester: Option<&Requester>) -> Result<LoadResult> {
        let artist = self.api.artist(id).await?;
        let mut top = self.api.artist_top(id).await?;
        self.api.drain(&mut top).await?;

        if top.data.is_empty() {
            return Ok(LoadResult::load_failed(Self::NO_TOP_SONGS));
        }

        let tracks = Self::tracks(&top.data, requester);
        Ok(LoadResult::playlist_loaded(
            format!("{}'s top songs", artist.name),
            tracks,
        ))
    }

    /// Loads a single track by ISRC.
    pub async fn load_isrc(&self, isrc: &str, requester: Option<&Requester>) -> LoadResult {
        match self.api.track_by_isrc(isrc).await {
            Ok(track) => LoadResult::track_loaded(Track::from_remote(&track, requester.cloned())),
            Err(e) => {
                warn!("failed loading isrc {isrc}: {e}");
                LoadResult::load_failed(e.message())
            }
        }
    }

    /// Searches tracks by free text.
    ///
    /// An empty result is still a `SEARCH_RESULT`; only a failing search
    /// reports `NO_MATCHES`.
    pub async fn search(&self, text: &str, requester: Option<&Requester>) -> LoadResult {
        match self.api.search(text).await {
            Ok(page) => LoadResult::search_result(Self::tracks(&page.data, requester)),
            Err(e) => {
                debug!("search for \"{text}\" failed: {e}");
                LoadResult::no_matches(e.message())
            }
        }
    }

    async fn delegate(&self, query: Query) -> Result<LoadResult> {
        match &self.fallback {
            Some(Fallback {
                resolver,
                default_platform,
            }) => {
                debug!(
                    "delegating \"{}\" with source {default_platform:?}",
                    query.text
                );
                let query = Query {
                    source: default_platform.clone(),
                    ..query
                };
                resolver.resolve(query).await
            }
            None => {
                debug!("no resolver for \"{}\"", query.text);
                Ok(LoadResult::no_matches(""))
            }
        }
    }
}

#[async_trait]
impl Resolver for DeezerResolver {
    async fn resolve(&self, query: Query) -> Result<LoadResult> {
        if link::is_share_link(&query.text, &self.share_link_prefix) {
            match self.api.expand(&query.text).await {
                Ok(Some(expanded)) if expanded.starts_with(&self.canonical_prefix) => {
                    debug!("share link {} expands to {expanded}", query.text);
                    let query = Query {
                        text: expanded,
                        source: None,
                        requester: query.requester,
                    };
                    return self.resolve(query).await;
                }
                Ok(expanded) => {
                    debug!("share link {} expands to {expanded:?}", query.text);
                }
                Err(e) => {
                    warn!("failed expanding share link {}: {e}", query.text);
                    return Ok(LoadResult::load_failed(e.message()));
                }
            }
        }

        if let Some(isrc) = link::isrc(&query.text) {
            return Ok(self.load_isrc(isrc, query.requester.as_ref()).await);
        }

        if Self::is_deezer_source(query.source.as_deref()) && !link::is_deezer_url(&query.text) {
            return Ok(self.search(&query.text, query.requester.as_ref()).await);
        }

        match link::classify(&query.text) {
            Some(resolved) => {
                debug!("loading {} {}", resolved.kind, resolved.id);
                Ok(self.load(&resolved, query.requester.as_ref()).await)
            }
            None => self.delegate(query).await,
        }
    }
}
