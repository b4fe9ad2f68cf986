use std::sync::Arc;

use async_trait::async_trait;

use crate::entities::{Album, Entity};
use crate::error::Result;

/// Query parameters forwarded to the remote service on a fetch, in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    params: Vec<(String, String)>,
}

impl QueryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// The authenticated fetch-and-parse collaborator behind every entity graph.
///
/// Implementations own the HTTP transport, authentication and the XML
/// document binding. A produced graph arrives with its session and parent
/// references already attached, so any node can fetch further data.
#[async_trait]
pub trait Session: Send + Sync {
    /// Fetch and parse the resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or the parse fails.
    async fn get_url(&self, url: &str, options: &QueryOptions) -> Result<Entity>;

    /// Fetch a single album's detail representation, photo entries included.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or the parse fails.
    async fn album(&self, id: &str, options: &QueryOptions) -> Result<Arc<Album>>;
}
