//! In-memory [`MovieApi`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use futures_util::future::BoxFuture;

use super::MovieApi;
use crate::Movie;

/// One recorded call against [`MockApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Popular,
    Search(String),
    Recommend(String),
    Poster(u64),
}

/// A hand-rolled mock returning canned lists.
///
/// Supports:
/// - Fixed responses for each list operation.
/// - Per-id poster responses (missing id = lookup failed).
/// - Optional latency for list calls and per-id latency for poster lookups.
/// - Call recording via [`calls()`](MockApi::calls).
#[derive(Default)]
pub struct MockApi {
    popular: Vec<Movie>,
    search: Vec<Movie>,
    recommendations: Vec<Movie>,
    posters: HashMap<u64, String>,
    list_delay: Option<Duration>,
    poster_delays: HashMap<u64, Duration>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_popular(mut self, movies: Vec<Movie>) -> Self {
        self.popular = movies;
        self
    }

    pub fn with_search(mut self, movies: Vec<Movie>) -> Self {
        self.search = movies;
        self
    }

    pub fn with_recommendations(mut self, movies: Vec<Movie>) -> Self {
        self.recommendations = movies;
        self
    }

    pub fn with_poster(mut self, id: u64, url: &str) -> Self {
        self.posters.insert(id, url.to_string());
        self
    }

    /// Simulated latency for popular, search and recommend.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Simulated latency for one poster lookup.
    pub fn with_poster_delay(mut self, id: u64, delay: Duration) -> Self {
        self.poster_delays.insert(id, delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn list_latency(&self) {
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl MovieApi for MockApi {
    fn fetch_popular(&self) -> BoxFuture<'_, Vec<Movie>> {
        Box::pin(async move {
            self.record(Call::Popular);
            self.list_latency().await;
            self.popular.clone()
        })
    }

    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Vec<Movie>> {
        Box::pin(async move {
            self.record(Call::Search(query.to_string()));
            self.list_latency().await;
            self.search.clone()
        })
    }

    fn recommend<'a>(&'a self, title: &'a str) -> BoxFuture<'a, Vec<Movie>> {
        Box::pin(async move {
            self.record(Call::Recommend(title.to_string()));
            self.list_latency().await;
            self.recommendations.clone()
        })
    }

    fn fetch_poster(&self, id: u64) -> BoxFuture<'_, Option<String>> {
        Box::pin(async move {
            self.record(Call::Poster(id));
            if let Some(delay) = self.poster_delays.get(&id) {
                tokio::time::sleep(*delay).await;
            }
            self.posters.get(&id).cloned()
        })
    }
}
