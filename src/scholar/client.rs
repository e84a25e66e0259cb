//! `reqwest`-backed citation-index client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::cookie::Jar;
use tracing::{debug, warn};

use crate::user_agent;

use super::html::parse_results;
use super::{CitationIndex, PAGE_SIZE, QueryError, SearchHit};

/// Default citation-index base URL.
const DEFAULT_BASE_URL: &str = "https://scholar.google.com";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Source-type filter sent with every query (articles, excludes patents).
const SOURCE_FILTER: &str = "0,5";

/// Queries the citation index over HTTP and parses its result pages.
///
/// An optional cookie jar carries a session across queries, which the service
/// throttles less aggressively than anonymous traffic.
pub struct ScholarClient {
    client: Client,
    base_url: String,
}

impl ScholarClient {
    /// Creates a client against the default service endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ClientBuild`] if HTTP client construction fails.
    pub fn new(cookie_jar: Option<Arc<Jar>>) -> Result<Self, QueryError> {
        Self::with_base_url(cookie_jar, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ClientBuild`] if HTTP client construction fails.
    pub fn with_base_url(
        cookie_jar: Option<Arc<Jar>>,
        base_url: impl Into<String>,
    ) -> Result<Self, QueryError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(user_agent::default_query_user_agent())
            .gzip(true);

        if let Some(jar) = cookie_jar {
            builder = builder.cookie_provider(jar);
        }

        let client = builder.build().map_err(|e| QueryError::ClientBuild {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch_page(&self, url: &str) -> Result<Vec<SearchHit>, QueryError> {
        debug!(%url, "querying citation index");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "citation index rejected query");
            return Err(QueryError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let hits = parse_results(&body);
        debug!(hits = hits.len(), "parsed result page");
        Ok(hits)
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CitationIndex for ScholarClient {
    async fn search(&self, words: &str) -> Result<Vec<SearchHit>, QueryError> {
        let url = format!(
            "{}/scholar?hl=en&as_sdt={SOURCE_FILTER}&num={PAGE_SIZE}&q={}",
            self.base_url,
            urlencoding::encode(words)
        );
        self.fetch_page(&url).await
    }

    async fn cited_by(
        &self,
        cluster_id: &str,
        start: usize,
    ) -> Result<Vec<SearchHit>, QueryError> {
        let url = format!(
            "{}/scholar?hl=en&as_sdt={SOURCE_FILTER}&num={PAGE_SIZE}&cites={}&start={start}",
            self.base_url,
            urlencoding::encode(cluster_id)
        );
        self.fetch_page(&url).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn result_page_html() -> String {
        r#"<html><body>
<div class="gs_r gs_or gs_scl" data-cid="AbCd">
  <h3 class="gs_rt"><a href="/x">A Great Paper</a></h3>
  <div class="gs_fl"><a href="/scholar?cites=424242&hl=en">Cited by 12</a></div>
</div>
</body></html>"#
            .to_string()
    }

    #[tokio::test]
    async fn test_search_sends_query_params_and_parses_hits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scholar"))
            .and(query_param("q", "a great paper"))
            .and(query_param("hl", "en"))
            .and(query_param("num", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_string(result_page_html()))
            .mount(&server)
            .await;

        let client = ScholarClient::with_base_url(None, server.uri()).unwrap();
        let hits = client.search("a great paper").await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "A Great Paper");
        assert_eq!(hits[0].cluster_id.as_deref(), Some("424242"));
        assert_eq!(hits[0].num_citations, 12);
    }

    #[tokio::test]
    async fn test_cited_by_sends_cites_and_start_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scholar"))
            .and(query_param("cites", "424242"))
            .and(query_param("start", "40"))
            .respond_with(ResponseTemplate::new(200).set_body_string(result_page_html()))
            .mount(&server)
            .await;

        let client = ScholarClient::with_base_url(None, server.uri()).unwrap();
        let hits = client.cited_by("424242", 40).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scholar"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = ScholarClient::with_base_url(None, server.uri()).unwrap();
        let result = client.search("anything").await;
        assert!(matches!(result, Err(QueryError::Status { status: 429 })));
    }

    #[tokio::test]
    async fn test_captcha_page_parses_as_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scholar"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body><form id="gs_captcha_f">robot check</form></body></html>"#,
            ))
            .mount(&server)
            .await;

        let client = ScholarClient::with_base_url(None, server.uri()).unwrap();
        let hits = client.search("anything").await.unwrap();
        assert!(hits.is_empty());
    }
}
