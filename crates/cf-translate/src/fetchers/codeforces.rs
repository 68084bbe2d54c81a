//! Codeforces fetcher
//!
//! Problem pages come from `/contest/{id}/problem/{index}`; rating and tags
//! from the public `contest.standings` API method.

use crate::client::{build_client, ensure_success, join_url};
use crate::error::Error;
use crate::fetchers::ProblemFetcher;
use crate::types::{ProblemId, ProblemMeta};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default site root
pub const CODEFORCES_URL: &str = "https://codeforces.com";

/// Timeout for problem pages
const STATEMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for API requests
const API_TIMEOUT: Duration = Duration::from_secs(10);

/// Problem pages are served to browsers only
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Codeforces problem fetcher
#[derive(Debug, Clone)]
pub struct CodeforcesFetcher {
    base_url: String,
    user_agent: Option<String>,
}

impl CodeforcesFetcher {
    /// Create a fetcher for codeforces.com
    pub fn new() -> Self {
        Self::with_base_url(CODEFORCES_URL)
    }

    /// Create a fetcher for a mirror or a mock server
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: None,
        }
    }

    /// Override the User-Agent sent with page requests
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    fn statement_url(&self, id: &ProblemId) -> String {
        join_url(
            &self.base_url,
            &format!("contest/{}/problem/{}", id.contest_id, id.index),
        )
    }

    fn standings_url(&self, id: &ProblemId) -> Result<Url, Error> {
        let raw = join_url(&self.base_url, "api/contest.standings");
        let mut url = Url::parse(&raw)
            .map_err(|e| Error::RequestError(format!("Invalid URL {}: {}", raw, e)))?;
        url.query_pairs_mut()
            .append_pair("contestId", &id.contest_id.to_string())
            .append_pair("from", "1")
            .append_pair("count", "1");
        Ok(url)
    }
}

impl Default for CodeforcesFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProblemFetcher for CodeforcesFetcher {
    fn name(&self) -> &'static str {
        "codeforces"
    }

    async fn fetch_statement(&self, id: &ProblemId) -> Result<String, Error> {
        let url = self.statement_url(id);
        debug!(problem = %id, url = %url, "Fetching problem page");

        let user_agent = self.user_agent.as_deref().unwrap_or(BROWSER_USER_AGENT);
        let client = build_client(Some(user_agent), HTML_ACCEPT, STATEMENT_TIMEOUT)?;
        let response = client.get(&url).send().await.map_err(Error::from_reqwest)?;
        let response = ensure_success(response)?;

        response.text().await.map_err(Error::from_reqwest)
    }

    async fn fetch_meta(&self, id: &ProblemId) -> Result<ProblemMeta, Error> {
        let url = self.standings_url(id)?;
        debug!(problem = %id, url = %url, "Fetching problem metadata");

        let client = build_client(None, "application/json", API_TIMEOUT)?;
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(Error::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(Error::from_reqwest)?;

        // The API reports its own failures as JSON with a non-2xx status.
        if !status.is_success() && serde_json::from_str::<serde_json::Value>(&body).is_err() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        meta_from_standings(&body, &id.index)
    }
}

/// `contest.standings` response (partial)
#[derive(Debug, Deserialize)]
struct StandingsResponse {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    result: Option<StandingsResult>,
}

#[derive(Debug, Deserialize)]
struct StandingsResult {
    #[serde(default)]
    problems: Vec<ApiProblem>,
}

#[derive(Debug, Deserialize)]
struct ApiProblem {
    index: String,
    #[serde(default)]
    rating: Option<u32>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Pick the problem's rating and tags out of a standings response
///
/// A problem missing from the list yields the default meta.
fn meta_from_standings(body: &str, index: &str) -> Result<ProblemMeta, Error> {
    let response: StandingsResponse = serde_json::from_str(body)
        .map_err(|e| Error::InvalidResponse(format!("standings: {}", e)))?;

    if response.status != "OK" {
        return Err(Error::InvalidResponse(
            response
                .comment
                .unwrap_or_else(|| format!("status {}", response.status)),
        ));
    }

    let meta = response
        .result
        .into_iter()
        .flat_map(|r| r.problems)
        .find(|p| p.index.eq_ignore_ascii_case(index))
        .map(|p| ProblemMeta {
            rating: p.rating,
            tags: p.tags,
        })
        .unwrap_or_default();
    Ok(meta)
}
