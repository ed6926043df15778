//! Registration of the Deezer resolver with a host.
//!
//! A host owns the resolver its players use. Loading the [`Deezer`] plugin
//! puts a [`DeezerResolver`] in front of whatever resolver the host had
//! installed before, which keeps handling every query the Deezer resolver
//! does not recognize.
//!
//! # Example
//!
//! ```rust
//! use deezer_resolver::{
//!     config::Config,
//!     plugin::{Deezer, Plugin, Registry},
//!     resolver::{Query, Resolver},
//! };
//!
//! let mut registry = Registry::new(Some("ytsearch".to_owned()));
//! Deezer::new(Config::default())?.load(&mut registry);
//!
//! let result = registry
//!     .resolve(Query::new("https://www.deezer.com/track/3135556"))
//!     .await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::Config,
    error::Result,
    http::{self, Transport},
    result::LoadResult,
    resolver::{DeezerResolver, Query, Resolver},
    track::Track,
};

/// The parts of a host a plugin may touch.
pub trait Host {
    /// The currently installed resolver, if any.
    fn resolver(&self) -> Option<Arc<dyn Resolver>>;

    fn set_resolver(&mut self, resolver: Arc<dyn Resolver>);

    /// Platform unrecognized queries should be searched on.
    fn default_platform(&self) -> Option<&str>;
}

pub trait Plugin {
    fn name(&self) -> &str;

    /// Installs the plugin's resolver, chaining to the one it replaces.
    fn load(&self, host: &mut dyn Host);
}

/// Plugin installing a [`DeezerResolver`].
pub struct Deezer {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl Deezer {
    /// Creates the plugin with a `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let client = http::Client::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(client)))
    }

    #[must_use]
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }
}

impl Plugin for Deezer {
    fn name(&self) -> &str {
        Track::SOURCE_NAME
    }

    fn load(&self, host: &mut dyn Host) {
        let mut resolver = DeezerResolver::new(&self.config, Arc::clone(&self.transport));
        if let Some(previous) = host.resolver() {
            let default_platform = host.default_platform().map(ToOwned::to_owned);
            resolver = resolver.with_fallback(previous, default_platform);
        }

        host.set_resolver(Arc::new(resolver));
        info!("loaded {} plugin", self.name());
    }
}

/// Minimal host holding a single resolver chain.
#[derive(Clone, Default)]
pub struct Registry {
    resolver: Option<Arc<dyn Resolver>>,
    default_platform: Option<String>,
}

impl Registry {
    #[must_use]
    pub fn new(default_platform: Option<String>) -> Self {
        Self {
            resolver: None,
            default_platform,
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

impl Host for Registry {
    fn resolver(&self) -> Option<Arc<dyn Resolver>> {
        self.resolver.clone()
    }

    fn set_resolver(&mut self, resolver: Arc<dyn Resolver>) {
        self.resolver = Some(resolver);
    }

    fn default_platform(&self) -> Option<&str> {
        self.default_platform.as_deref()
    }
}

/// Resolves through the installed chain; without one nothing matches.
#[async_trait]
impl Resolver for Registry {
    async fn resolve(&self, query: Query) -> Result<LoadResult> {
        match &self.resolver {
            Some(resolver) => resolver.resolve(query).await,
            None => Ok(LoadResult::no_matches("")),
        }
    }
}
