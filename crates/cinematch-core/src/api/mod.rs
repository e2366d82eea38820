//! Data access layer: read-only calls to the recommendation backend and the
//! search/details proxy.

pub mod http;
#[cfg(test)]
pub(crate) mod mock;

use futures_util::future::BoxFuture;

use crate::Movie;

/// The four read operations the client needs from its services.
///
/// Implementations never fail from the caller's point of view: a failed
/// fetch is logged and comes back as an empty list or `None`.
pub trait MovieApi: Send + Sync {
    /// Popular movies, in backend order.
    fn fetch_popular(&self) -> BoxFuture<'_, Vec<Movie>>;

    /// Free-text search through the proxy.
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Vec<Movie>>;

    /// Movies similar to the one with the given title.
    fn recommend<'a>(&'a self, title: &'a str) -> BoxFuture<'a, Vec<Movie>>;

    /// Poster URL for a single movie, looked up through the proxy's movie
    /// details record. `None` when the movie has no poster or the lookup
    /// failed.
    fn fetch_poster(&self, id: u64) -> BoxFuture<'_, Option<String>>;
}
