use std::time::Duration;

use futures_util::future::BoxFuture;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::MovieApi;
use crate::{Config, FetchError, Movie};

const USER_AGENT: &str = concat!("cinematch/", env!("CARGO_PKG_VERSION"));

/// One of the two services the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Popular list and recommendations.
    Backend,
    /// Search and per-movie details.
    Proxy,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Proxy => "proxy",
        }
    }
}

/// Shape of `/movie/{id}`: only the poster is read, the rest of the details
/// record is ignored.
#[derive(Deserialize)]
struct PosterRecord {
    #[serde(default)]
    poster: Option<String>,
}

/// [`MovieApi`] over HTTP with reqwest.
pub struct HttpMovieApi {
    client: reqwest::Client,
    backend_url: String,
    proxy_url: String,
    timeout: Option<Duration>,
    recommendation_count: Option<usize>,
}

impl HttpMovieApi {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build on an existing client (shared connection pool).
    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            backend_url: config.backend_url.trim_end_matches('/').to_string(),
            proxy_url: config.proxy_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            recommendation_count: config.recommendation_count,
        }
    }

    fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Backend => &self.backend_url,
            Service::Proxy => &self.proxy_url,
        }
    }

    fn url(&self, service: Service, path: &str) -> String {
        format!("{}/{}", self.base_url(service), path)
    }

    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, FetchError> {
        let mut request = self.client.get(url).query(query);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let body = self.get(url, query).await?.text().await?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    pub async fn try_fetch_popular(&self) -> Result<Vec<Movie>, FetchError> {
        self.get_json(&self.url(Service::Backend, "popular"), &[])
            .await
    }

    pub async fn try_search(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
        self.get_json(
            &self.url(Service::Proxy, "search"),
            &[("query", query.to_string())],
        )
        .await
    }

    pub async fn try_recommend(&self, title: &str) -> Result<Vec<Movie>, FetchError> {
        let mut params = vec![("title", title.to_string())];
        if let Some(n) = self.recommendation_count {
            params.push(("n", n.to_string()));
        }
        self.get_json(&self.url(Service::Backend, "recommend"), &params)
            .await
    }

    /// Poster from the proxy's details endpoint. An empty string is treated
    /// the same as a missing poster.
    pub async fn try_fetch_poster(&self, id: u64) -> Result<Option<String>, FetchError> {
        let record: PosterRecord = self
            .get_json(&self.url(Service::Proxy, &format!("movie/{id}")), &[])
            .await?;
        Ok(record.poster.filter(|p| !p.is_empty()))
    }

    /// Probe `GET {base}/health`. Any 2xx counts as healthy; the body is not
    /// inspected.
    pub async fn check_health(&self, service: Service) -> Result<(), FetchError> {
        self.get(&self.url(service, "health"), &[]).await?;
        Ok(())
    }
}

/// Log a failed fetch and fall back.
fn or_fallback<T>(op: &'static str, result: Result<T, FetchError>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(op, error = %err, "fetch failed");
            fallback
        }
    }
}

impl MovieApi for HttpMovieApi {
    fn fetch_popular(&self) -> BoxFuture<'_, Vec<Movie>> {
        Box::pin(async move { or_fallback("popular", self.try_fetch_popular().await, Vec::new()) })
    }

    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Vec<Movie>> {
        Box::pin(async move { or_fallback("search", self.try_search(query).await, Vec::new()) })
    }

    fn recommend<'a>(&'a self, title: &'a str) -> BoxFuture<'a, Vec<Movie>> {
        Box::pin(async move {
            or_fallback("recommend", self.try_recommend(title).await, Vec::new())
        })
    }

    fn fetch_poster(&self, id: u64) -> BoxFuture<'_, Option<String>> {
        Box::pin(async move { or_fallback("poster", self.try_fetch_poster(id).await, None) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = Config {
            backend_url: "http://example.test/api/".into(),
            proxy_url: "http://proxy.test/api//".into(),
            ..Config::default()
        };
        let api = HttpMovieApi::new(&config).expect("client builds");
        assert_eq!(
            api.url(Service::Backend, "popular"),
            "http://example.test/api/popular"
        );
        assert_eq!(
            api.url(Service::Proxy, "movie/7"),
            "http://proxy.test/api/movie/7"
        );
    }

    #[test]
    fn service_names() {
        assert_eq!(Service::Backend.name(), "backend");
        assert_eq!(Service::Proxy.name(), "proxy");
    }
}
