//! GitHub REST adapter for change requests
//!
//! This module provides:
//! - A shared HTTP client with timeout, User-Agent, and bearer auth
//! - Exponential backoff retry logic (max 3 retries)
//! - Pull request retrieval: `GET /repos/{owner}/{repo}/pulls/{number}`

use super::{ChangeRequest, ChangeRequestSource};
use crate::error::{ConfigError, SourceError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("relnotes/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// GitHub REST API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    token: Option<String>,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new(token: Option<String>) -> Result<Self, SourceError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, token)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(
        timeout: Duration,
        user_agent: &str,
        token: Option<String>,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                SourceError::network_error("-", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.is_empty()),
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request with retry logic, returning the body text
    pub async fn get_text(&self, url: &str, number: &str) -> Result<String, SourceError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            let mut request = self
                .client
                .get(url)
                .header(ACCEPT, "application/vnd.github+json");
            if let Some(ref token) = self.token {
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
                        last_error = Some(SourceError::RateLimitExceeded {
                            host: "GitHub".to_string(),
                        });
                    } else if status == StatusCode::NOT_FOUND {
                        return Err(SourceError::ChangeRequestNotFound {
                            number: number.to_string(),
                            repo: url.to_string(),
                        });
                    } else if !status.is_success() {
                        return Err(SourceError::network_error(number, format!("HTTP {}", status)));
                    } else {
                        match response.text().await {
                            Ok(text) => return Ok(text),
                            Err(e) => {
                                last_error = Some(SourceError::InvalidResponse {
                                    number: number.to_string(),
                                    message: format!("failed to read body: {}", e),
                                });
                            }
                        }
                    }
                }
                Err(e) => {
                    last_error = Some(if e.is_timeout() {
                        SourceError::Timeout {
                            number: number.to_string(),
                        }
                    } else {
                        SourceError::network_error(number, e.to_string())
                    });
                }
            }

            if attempt < self.max_retries {
                tracing::debug!(attempt, delay_ms = delay, "retrying GitHub request");
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| SourceError::network_error(number, "unknown error")))
    }
}

/// Pull request payload (only the fields we read)
#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    number: u64,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<LabelResponse>,
}

#[derive(Debug, Deserialize)]
struct LabelResponse {
    name: String,
}

impl From<PullRequestResponse> for ChangeRequest {
    fn from(response: PullRequestResponse) -> Self {
        ChangeRequest::new(
            response.number.to_string(),
            response.body,
            response.labels.into_iter().map(|l| l.name).collect(),
        )
    }
}

/// Change requests backed by GitHub pull requests
#[derive(Clone)]
pub struct GitHubChangeRequests {
    client: HttpClient,
    repo: String,
    api_url: String,
}

impl GitHubChangeRequests {
    /// Create a source for `owner/name`
    pub fn new(client: HttpClient, repo: &str) -> Result<Self, ConfigError> {
        let valid = matches!(repo.split_once('/'), Some((owner, name))
            if !owner.is_empty() && !name.is_empty() && !name.contains('/'));
        if !valid {
            return Err(ConfigError::InvalidRepository {
                value: repo.to_string(),
            });
        }

        Ok(Self {
            client,
            repo: repo.to_string(),
            api_url: GITHUB_API_URL.to_string(),
        })
    }

    /// Point at a different API host (GitHub Enterprise)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    fn pull_url(&self, number: &str) -> String {
        format!("{}/repos/{}/pulls/{}", self.api_url, self.repo, number)
    }
}

fn parse_pull_request(text: &str, number: &str) -> Result<ChangeRequest, SourceError> {
    serde_json::from_str::<PullRequestResponse>(text)
        .map(ChangeRequest::from)
        .map_err(|e| SourceError::InvalidResponse {
            number: number.to_string(),
            message: format!("failed to parse JSON: {}", e),
        })
}

#[async_trait]
impl ChangeRequestSource for GitHubChangeRequests {
    async fn fetch(&self, number: &str) -> Result<ChangeRequest, SourceError> {
        let text = self
            .client
            .get_text(&self.pull_url(number), number)
            .await
            .map_err(|e| match e {
                SourceError::ChangeRequestNotFound { number, .. } => {
                    SourceError::ChangeRequestNotFound {
                        number,
                        repo: self.repo.clone(),
                    }
                }
                other => other,
            })?;
        parse_pull_request(&text, number)
    }
}
