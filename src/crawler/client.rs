//! Authenticated GitHub REST client with rate-limit tracking, retry/backoff,
//! and per_page=100 pagination.

use anyhow::Result;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::sleep;
use tracing::{error, info, warn};

use super::records::CommitStats;

const DEFAULT_API_URL: &str = "https://api.github.com";
const AGENT: &str = "patchmine-crawler";
const PER_PAGE: usize = 100;
/// Sleep before the next request once the advertised remaining quota drops
/// below this.
const LOW_RATE_THRESHOLD: i64 = 50;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<Actor>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub merged_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitIdentity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitMeta {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<GitIdentity>,
    #[serde(default)]
    pub committer: Option<GitIdentity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    #[serde(default)]
    pub commit: CommitMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitFile {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changes: u64,
    #[serde(default)]
    pub patch: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub sha: String,
    #[serde(default)]
    pub stats: CommitStats,
    #[serde(default)]
    pub files: Vec<CommitFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub user: Option<Actor>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewComment {
    #[serde(default)]
    pub user: Option<Actor>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub line: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

pub struct GithubClient {
    http: HttpClient,
    base_url: String,
    token: String,
    api_calls: u64,
    rate_limit_remaining: i64,
}

impl GithubClient {
    pub fn new(token: String) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_API_URL.to_string(),
            token,
            api_calls: 0,
            rate_limit_remaining: 5000,
        })
    }

    /// Point the client at a different API root (for testing).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_calls(&self) -> u64 {
        self.api_calls
    }

    pub fn rate_limit_remaining(&self) -> i64 {
        self.rate_limit_remaining
    }

    async fn throttle(&self) {
        if self.rate_limit_remaining < LOW_RATE_THRESHOLD {
            warn!(
                remaining = self.rate_limit_remaining,
                "api rate limit low, waiting"
            );
            sleep(Duration::from_secs(60)).await;
        }
    }

    fn update_rate_limit(&mut self, headers: &HeaderMap) {
        if let Some(remaining) = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
        {
            self.rate_limit_remaining = remaining;
        }
    }

    /// Seconds until the advertised rate-limit reset, floored at one minute.
    fn reset_wait(headers: &HeaderMap) -> Duration {
        let reset_epoch: u64 = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Duration::from_secs(reset_epoch.saturating_sub(now).max(60))
    }

    /// One GET with the crawl's status policy: 200 → body, 403 → wait out the
    /// rate-limit window and retry, 404 → absent, 502/503/504 → exponential
    /// backoff, anything else → log and treat as absent.
    async fn get_json<T: DeserializeOwned>(
        &mut self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>> {
        for attempt in 0..MAX_RETRIES {
            self.throttle().await;

            let request = self
                .http
                .get(url)
                .header(AUTHORIZATION, format!("token {}", self.token))
                .header(ACCEPT, "application/vnd.github.v3+json")
                .header(USER_AGENT, AGENT)
                .query(params);

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    warn!("request failed (attempt {}): {err}", attempt + 1);
                    if attempt + 1 < MAX_RETRIES {
                        sleep(Duration::from_secs(1 << attempt)).await;
                        continue;
                    }
                    return Err(err.into());
                }
            };

            self.api_calls += 1;
            self.update_rate_limit(response.headers());
            let status = response.status();

            match status.as_u16() {
                200 => return Ok(Some(response.json::<T>().await?)),
                403 => {
                    let wait = Self::reset_wait(response.headers());
                    warn!("rate limit exceeded, waiting {}s", wait.as_secs());
                    sleep(wait).await;
                    continue;
                }
                404 => {
                    warn!("resource not found: {url}");
                    return Ok(None);
                }
                502 | 503 | 504 => {
                    warn!("server error {status}, retrying in {}s", 1u64 << attempt);
                    sleep(Duration::from_secs(1 << attempt)).await;
                    continue;
                }
                _ => {
                    let body = response.text().await.unwrap_or_default();
                    error!("api request failed: {status} - {body}");
                    return Ok(None);
                }
            }
        }
        Ok(None)
    }

    async fn get_paginated<T: DeserializeOwned>(
        &mut self,
        url: &str,
        page_delay: Duration,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1usize;
        loop {
            let params = [
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            let Some(batch) = self.get_json::<Vec<T>>(url, &params).await? else {
                break;
            };
            let batch_len = batch.len();
            items.extend(batch);
            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
            sleep(page_delay).await;
        }
        Ok(items)
    }

    /// Lists a repository's merged PRs (closed, most recently updated first).
    ///
    /// Returns `None` when the repository looks too large to be worth the API
    /// budget: a first page with more than 80 merged entries out of a full
    /// page estimates ×10 total, and the accumulated count is also capped.
    pub async fn list_merged_prs(
        &mut self,
        owner: &str,
        repo: &str,
        skip_if_too_many: usize,
    ) -> Result<Option<Vec<PullRequest>>> {
        info!("listing merged PRs for {owner}/{repo}");
        let url = format!("{}/repos/{owner}/{repo}/pulls", self.base_url);
        let mut prs: Vec<PullRequest> = Vec::new();
        let mut page = 1usize;

        loop {
            let params = [
                ("state", "closed".to_string()),
                ("sort", "updated".to_string()),
                ("direction", "desc".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            let Some(batch) = self.get_json::<Vec<PullRequest>>(&url, &params).await? else {
                break;
            };
            let batch_len = batch.len();
            let merged: Vec<PullRequest> = batch
                .into_iter()
                .filter(|pr| pr.merged_at.is_some())
                .collect();
            let merged_len = merged.len();
            prs.extend(merged);
            info!(
                "found {merged_len} merged PRs on page {page}, total: {}",
                prs.len()
            );

            if page == 1 && merged_len > 80 && batch_len == PER_PAGE {
                let estimated = merged_len * 10;
                if estimated > skip_if_too_many {
                    warn!("skipping {owner}/{repo} - estimated {estimated} merged PRs");
                    return Ok(None);
                }
            }
            if prs.len() > skip_if_too_many {
                warn!("skipping {owner}/{repo} - found {} merged PRs", prs.len());
                return Ok(None);
            }
            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
            sleep(Duration::from_millis(500)).await;
        }

        info!("found total {} merged PRs for {owner}/{repo}", prs.len());
        Ok(Some(prs))
    }

    pub async fn pr_commits(
        &mut self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitSummary>> {
        let url = format!("{}/repos/{owner}/{repo}/pulls/{number}/commits", self.base_url);
        self.get_paginated(&url, Duration::from_millis(200)).await
    }

    pub async fn pr_files(
        &mut self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitFile>> {
        let url = format!("{}/repos/{owner}/{repo}/pulls/{number}/files", self.base_url);
        self.get_paginated(&url, Duration::from_millis(200)).await
    }

    pub async fn pr_reviews(&mut self, owner: &str, repo: &str, number: u64) -> Result<Vec<Review>> {
        let url = format!("{}/repos/{owner}/{repo}/pulls/{number}/reviews", self.base_url);
        self.get_paginated(&url, Duration::from_millis(200)).await
    }

    pub async fn pr_review_comments(
        &mut self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<ReviewComment>> {
        let url = format!("{}/repos/{owner}/{repo}/pulls/{number}/comments", self.base_url);
        self.get_paginated(&url, Duration::from_millis(200)).await
    }

    pub async fn commit_details(
        &mut self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<Option<CommitDetail>> {
        let url = format!("{}/repos/{owner}/{repo}/commits/{sha}", self.base_url);
        self.get_json(&url, &[]).await
    }
}
