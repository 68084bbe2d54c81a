//! HTTP client helpers shared by the fetcher and the translation backends

use crate::error::Error;
use crate::DEFAULT_USER_AGENT;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;

/// Build a client with a user agent and a whole-request timeout
pub(crate) fn build_client(
    user_agent: Option<&str>,
    accept: &'static str,
    timeout: Duration,
) -> Result<reqwest::Client, Error> {
    let mut headers = HeaderMap::new();
    let user_agent = user_agent.unwrap_or(DEFAULT_USER_AGENT);
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
    );
    headers.insert(ACCEPT, HeaderValue::from_static(accept));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(Error::ClientBuildError)
}

/// Fail on non-2xx responses
pub(crate) fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::HttpStatus {
            url: response.url().to_string(),
            status: status.as_u16(),
        })
    }
}

/// Join a base URL and a path without doubling the slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://codeforces.com/", "/contest/1/problem/A"),
            "https://codeforces.com/contest/1/problem/A"
        );
        assert_eq!(
            join_url("http://127.0.0.1:8080", "translate"),
            "http://127.0.0.1:8080/translate"
        );
    }

    #[test]
    fn test_build_client_with_invalid_user_agent_falls_back() {
        let client = build_client(Some("bad\nagent"), "*/*", Duration::from_secs(1));
        assert!(client.is_ok());
    }
}
