//! Client for the public Deezer API.
//!
//! Wraps a [`Transport`] with the endpoint knowledge the resolver needs:
//!
//! * fetching tracks, albums, playlists, artists and search results
//! * following the `next` links of paginated listings
//! * expanding share links into canonical links
//!
//! Requests are unauthenticated and are not retried. Responses with a
//! non-success status are still parsed, as Deezer puts its error details in
//! the body.

use std::{fmt::Debug, sync::Arc};

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    config::Config,
    error::{Error, Result},
    http::{Redirect, Transport},
    protocol::{
        self,
        api::{Album, Artist, ErrorResponse, Page, Playlist, Track},
    },
};

pub struct Api {
    transport: Arc<dyn Transport>,
    base_url: Url,
    max_pages: usize,
}

impl Api {
    #[must_use]
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: config.api_url.clone(),
            max_pages: config.max_pages,
        }
    }

    /// Builds an endpoint URL by appending path segments to the API base.
    ///
    /// Segments are percent-encoded, so ids taken from user input cannot
    /// escape their path segment.
    ///
    /// # Errors
    ///
    /// Returns error if the configured base URL cannot have a path.
    pub fn url<'a, I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::internal(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Fetches and parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// * the request fails
    /// * the API reports an error in the body
    /// * the body does not parse as `T`
    pub async fn fetch<T>(&self, url: Url, origin: &str) -> Result<T>
    where
        T: DeserializeOwned + Debug,
    {
        let response = self.transport.get(url, Redirect::Follow).await?;
        if !response.status.is_success() {
            debug!("{origin}: http status {}", response.status);
        }

        if let Ok(ErrorResponse { error }) = serde_json::from_str(&response.body) {
            debug!("{origin}: api error {error:?}");
            return Err(error.into());
        }

        protocol::json(&response.body, origin)
    }

    async fn get<T>(&self, segments: &[&str]) -> Result<T>
    where
        T: DeserializeOwned + Debug,
    {
        let url = self.url(segments.iter().copied())?;
        let origin = segments.first().copied().unwrap_or("api");
        self.fetch(url, origin).await
    }

    pub async fn track(&self, id: &str) -> Result<Track> {
        self.get(&["track", id]).await
    }

    /// Looks up a track by its International Standard Recording Code.
    pub async fn track_by_isrc(&self, isrc: &str) -> Result<Track> {
        let segment = format!("isrc:{isrc}");
        self.get(&["track", segment.as_str()]).await
    }

    pub async fn album(&self, id: &str) -> Result<Album> {
        self.get(&["album", id]).await
    }

    pub async fn playlist(&self, id: &str) -> Result<Playlist> {
        self.get(&["playlist", id]).await
    }

    pub async fn artist(&self, id: &str) -> Result<Artist> {
        self.get(&["artist", id]).await
    }

    /// First page of an artist's most popular tracks. Use [`drain`] to
    /// fetch the rest.
    ///
    /// [`drain`]: Self::drain
    pub async fn artist_top(&self, id: &str) -> Result<Page<Track>> {
        self.get(&["artist", id, "top"]).await
    }

    /// Searches tracks by free text.
    pub async fn search(&self, query: &str) -> Result<Page<Track>> {
        let mut url = self.url(["search"])?;
        url.query_pairs_mut().append_pair("q", query);
        self.fetch(url, "search").await
    }

    /// Follows `next` links until the listing is exhausted, appending every
    /// page's items to `page` in order.
    ///
    /// Pages are fetched one after the other, as each one names its
    /// successor. At most `max_pages` follow-up pages are fetched.
    ///
    /// # Errors
    ///
    /// Returns error if a page cannot be fetched, or with
    /// [`ResourceExhausted`](crate::error::ErrorKind::ResourceExhausted) if
    /// the listing does not end within `max_pages` pages.
    pub async fn drain<T>(&self, page: &mut Page<T>) -> Result<()>
    where
        T: DeserializeOwned + Debug,
    {
        let mut followed = 0;
        while let Some(next) = page.next.take() {
            if followed >= self.max_pages {
                return Err(Error::resource_exhausted(format!(
                    "pagination exceeded {} pages",
                    self.max_pages
                )));
            }

            let more: Page<T> = self.fetch(next, "page").await?;
            followed += 1;

            page.data.extend(more.data);
            page.next = more.next;
        }

        if followed > 0 {
            debug!("followed {followed} pages for {} items", page.data.len());
        }

        Ok(())
    }

    /// Expands a share link by a single redirect hop.
    ///
    /// Returns the `Location` of a `302 Found` response, or `None` for any
    /// other status.
    ///
    /// # Errors
    ///
    /// Returns error if the link is not a valid URL or the request fails.
    pub async fn expand(&self, share_link: &str) -> Result<Option<String>> {
        let url = Url::parse(share_link)?;
        let response = self.transport.get(url, Redirect::Manual).await?;

        if response.status == http::StatusCode::FOUND {
            Ok(response.location)
        } else {
            debug!("share link {share_link} answered {}", response.status);
            Ok(None)
        }
    }
}
