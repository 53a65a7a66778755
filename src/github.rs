//! GitHub REST client plus the listing and aggregation logic built on it.
//!
//! The per-repository operations sit behind the [`RepoSource`] trait so the
//! pagination loop and the aggregator can be exercised against a mock without
//! touching the network. `GithubClient` forwards the stored credential on
//! every outbound request, including the reachability probe and the language
//! fetch.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

#[cfg(test)]
use mockall::automock;

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = "langstats";
const PER_PAGE: u32 = 100;

/// Safety cap on the pagination loop so a misbehaving upstream that never
/// returns an empty page cannot spin forever. 100 pages of 100 repositories.
pub const MAX_PAGES: u32 = 100;

/// Public profile record. Every field is optional on the wire; absent fields
/// are rendered as placeholders, never treated as errors.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub html_url: Option<String>,
}

/// One entry from the repository listing. A record missing `name` or `url`
/// is malformed and skipped during aggregation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub name: Option<String>,
    pub url: Option<String>,
    pub languages_url: Option<String>,
}

/// Per-repository GitHub operations, mockable for tests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepoSource {
    /// Fetch one page of the user's public repositories. Non-200 is an error.
    async fn repo_page(&self, username: &str, page: u32) -> Result<Vec<Repository>>;

    /// Probe a repository's API URL; true only on HTTP 200.
    async fn is_accessible(&self, repo_api_url: &str) -> bool;

    /// Fetch the language/byte-count breakdown; empty on any failure.
    async fn languages(&self, languages_url: &str) -> HashMap<String, u64>;
}

#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            token,
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.get(url).header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Fetch the user's public profile. Non-200 is fatal to the caller.
    pub async fn fetch_profile(&self, username: &str) -> Result<UserProfile> {
        let url = format!("{GITHUB_API}/users/{username}");

        let resp = self
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Network error fetching user profile: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Failed to fetch user profile: {} - {body}",
                status.as_u16()
            ));
        }

        resp.json::<UserProfile>()
            .await
            .context("Failed to parse user profile JSON")
    }
}

#[async_trait]
impl RepoSource for GithubClient {
    async fn repo_page(&self, username: &str, page: u32) -> Result<Vec<Repository>> {
        let url = format!("{GITHUB_API}/users/{username}/repos?page={page}&per_page={PER_PAGE}");

        let resp = self
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Network error fetching repositories: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Failed to fetch repositories: {} - {body}",
                status.as_u16()
            ));
        }

        resp.json::<Vec<Repository>>()
            .await
            .context("Failed to parse repository list JSON")
    }

    async fn is_accessible(&self, repo_api_url: &str) -> bool {
        match self.get(repo_api_url).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!(
                    url = %repo_api_url,
                    status = resp.status().as_u16(),
                    "repository not accessible"
                );
                false
            }
            Err(e) => {
                warn!(url = %repo_api_url, error = %e, "repository probe failed");
                false
            }
        }
    }

    async fn languages(&self, languages_url: &str) -> HashMap<String, u64> {
        let resp = match self.get(languages_url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(url = %languages_url, error = %e, "language fetch failed");
                return HashMap::new();
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(
                url = %languages_url,
                status = status.as_u16(),
                "failed to fetch languages"
            );
            return HashMap::new();
        }

        match resp.json::<HashMap<String, u64>>().await {
            Ok(languages) => languages,
            Err(e) => {
                warn!(url = %languages_url, error = %e, "failed to parse language JSON");
                HashMap::new()
            }
        }
    }
}

/// List all public repositories for `username`, one page at a time, until an
/// empty page ends the pagination or the page cap is reached.
pub async fn list_repositories(
    source: &impl RepoSource,
    username: &str,
) -> Result<Vec<Repository>> {
    let mut repos = Vec::new();
    let mut page = 1u32;

    loop {
        let batch = source.repo_page(username, page).await?;
        if batch.is_empty() {
            break;
        }
        repos.extend(batch);

        if page >= MAX_PAGES {
            warn!(
                pages = MAX_PAGES,
                "stopping repository listing at page cap; listing may be incomplete"
            );
            break;
        }
        page += 1;
    }

    Ok(repos)
}

/// Sum language byte counts across repositories, in listing order.
///
/// Malformed records, repositories that fail the reachability probe, and
/// repositories whose language fetch fails are skipped with a warning; none
/// of them abort the run.
pub async fn aggregate_languages(
    source: &impl RepoSource,
    repos: &[Repository],
) -> HashMap<String, u64> {
    let mut totals = HashMap::new();

    for repo in repos {
        let (Some(name), Some(api_url)) = (&repo.name, &repo.url) else {
            warn!(?repo, "skipping repository with missing data");
            continue;
        };

        if !source.is_accessible(api_url).await {
            warn!(repo = %name, "skipping inaccessible repository");
            continue;
        }

        let Some(languages_url) = &repo.languages_url else {
            warn!(repo = %name, "repository has no languages URL");
            continue;
        };

        let languages = source.languages(languages_url).await;
        if languages.is_empty() {
            warn!(repo = %name, "no languages found for repository");
            continue;
        }

        merge_language_counts(&mut totals, languages);
    }

    totals
}

/// Add one repository's language byte counts into the running totals.
pub fn merge_language_counts(totals: &mut HashMap<String, u64>, languages: HashMap<String, u64>) {
    for (language, bytes) in languages {
        let entry = totals.entry(language).or_insert(0);
        *entry = entry.saturating_add(bytes);
    }
}
