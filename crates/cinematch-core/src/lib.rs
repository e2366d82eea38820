use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod api;
pub mod config_file;
pub mod controller;
pub mod display;
pub mod fanout;

// Re-export for convenience
pub use api::MovieApi;
pub use api::http::{HttpMovieApi, Service};
pub use controller::{Controller, ListView, SessionState, ViewState};
pub use fanout::{backfill_posters, join_all_ordered};

/// Default base URL of the recommendation backend (popular list, recommendations).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/api";
/// Default base URL of the search/details proxy (search, per-movie posters).
pub const DEFAULT_PROXY_URL: &str = "http://localhost:8000/api";

/// A movie record as returned by either service.
///
/// Only `id` and `title` are required on the wire; every other field is
/// optional and defaults to `None` when absent or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub poster: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
}

impl Movie {
    /// A bare record with only the required fields set.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster: None,
            vote_average: None,
            release_date: None,
            overview: None,
            vote_count: None,
            popularity: None,
        }
    }

    /// True when the record carries a usable (non-empty) poster URL.
    pub fn has_poster(&self) -> bool {
        self.poster.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Copy of this record with `poster` replaced. Nothing else changes.
    pub fn with_poster(self, poster: Option<String>) -> Self {
        Self { poster, ..self }
    }
}

/// Why a request to one of the services failed.
///
/// Never crosses the [`MovieApi`] boundary: the HTTP implementation logs it
/// and substitutes an empty result.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolved client configuration (CLI > env > config file > defaults).
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub proxy_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Number of recommendations to ask the backend for. `None` uses the
    /// backend's own default.
    pub recommendation_count: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            timeout: None,
            recommendation_count: None,
        }
    }
}
