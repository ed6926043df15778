//! HTTP transport for the public Deezer API and share-link expansion.
//!
//! The resolver talks to the network only through the [`Transport`] trait,
//! so hosts and tests can supply their own implementation. [`Client`] is the
//! production implementation on top of `reqwest`. It keeps two clients:
//!
//! * one following redirects, for JSON API calls
//! * one that never follows redirects, so a share link's `302 Found` and its
//!   `Location` header can be observed
//!
//! No timeouts, retries or rate limiting are applied; a network error is
//! reported as-is to the caller.
//!
//! # Example
//!
//! ```rust
//! use deezer_resolver::{config::Config, http::{Client, Redirect, Transport}};
//!
//! let client = Client::new(&Config::default())?;
//! let url = "https://api.deezer.com/2.0/track/3135556".parse()?;
//! let response = client.get(url, Redirect::Follow).await?;
//! assert!(response.status.is_success());
//! ```

use async_trait::async_trait;
use futures_util::TryFutureExt;
use http::StatusCode;
use reqwest::{
    self,
    header::{HeaderValue, ACCEPT_LANGUAGE, LOCATION},
    redirect, Url,
};

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Whether a request may follow HTTP redirects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Redirect {
    Follow,
    Manual,
}

/// A fully read HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,

    /// Value of the `Location` header, if any.
    pub location: Option<String>,

    pub body: String,
}

impl Response {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            location: None,
            body: body.into(),
        }
    }

    /// A `302 Found` pointing at `location`, with an empty body.
    #[must_use]
    pub fn found(location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FOUND,
            location: Some(location.into()),
            body: String::new(),
        }
    }
}

/// Issues GET requests on behalf of the resolver.
///
/// Implementations must return non-success responses as `Ok` with their
/// status and body intact; only transport failures are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url, redirect: Redirect) -> Result<Response>;
}

/// `reqwest`-backed [`Transport`].
pub struct Client {
    /// Client that follows redirects like a browser would.
    pub following: reqwest::Client,

    /// Client that hands back redirect responses unfollowed.
    pub manual: reqwest::Client,
}

impl Client {
    /// Creates both underlying clients.
    ///
    /// # Errors
    ///
    /// Returns error if the TLS backend cannot be initialized or the
    /// configured `User-Agent` is not a valid header value.
    pub fn new(config: &Config) -> Result<Self> {
        // Not having `Accept-Language` set is non-fatal.
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(lang) = HeaderValue::from_str(&config.app_lang) {
            headers.insert(ACCEPT_LANGUAGE, lang);
        }

        let builder = || {
            reqwest::Client::builder()
                .default_headers(headers.clone())
                .user_agent(&config.user_agent)
        };

        Ok(Self {
            following: builder().build()?,
            manual: builder().redirect(redirect::Policy::none()).build()?,
        })
    }

    fn client(&self, redirect: Redirect) -> &reqwest::Client {
        match redirect {
            Redirect::Follow => &self.following,
            Redirect::Manual => &self.manual,
        }
    }
}

#[async_trait]
impl Transport for Client {
    async fn get(&self, url: Url, redirect: Redirect) -> Result<Response> {
        trace!("GET {url}");
        let response = self.client(redirect).get(url).send().await?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .map(HeaderValue::to_str)
            .transpose()?
            .map(ToOwned::to_owned);
        let body = response.text().map_err(Error::from).await?;

        Ok(Response {
            status,
            location,
            body,
        })
    }
}
