mod builder;
mod payload;
mod rate_limit;

pub use builder::{GithubClientBuilder, GITHUB_API_URL};
pub use rate_limit::RateLimit;

use async_trait::async_trait;
use gitview::api::{is_pages_repository, Client, Error, LanguageBytes, Profile, Repository, Result};
use log::debug;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use url::Url;

pub struct GithubClient {
    client: reqwest::Client,
    github_url: Url,
}

impl GithubClient {
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.github_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        subject: impl FnOnce() -> String,
    ) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| Error::Network(err.to_string()))?;
        read_response(response, subject).await
    }
}

/// Maps error statuses to [`Error`] and decodes successful bodies.
async fn read_response<T: DeserializeOwned>(response: Response, subject: impl FnOnce() -> String) -> Result<T> {
    if let Some(rate_limit) = RateLimit::from_headers(response.headers()) {
        debug!("Remaining API quota {}/{}", rate_limit.remaining, rate_limit.limit);
    }
    match response.status() {
        status if status.is_success() => response
            .json::<T>()
            .await
            .map_err(|err| Error::InvalidResponse(err.to_string())),
        StatusCode::NOT_FOUND => Err(Error::NotFound(subject())),
        StatusCode::FORBIDDEN => Err(Error::RateLimited {
            reset: rate_limit::reset_at(response.headers()),
        }),
        status => Err(Error::Api {
            status: status.as_u16(),
        }),
    }
}

#[async_trait]
impl Client for GithubClient {
    const MAX_PAGE_SIZE: u32 = 100;

    async fn profile(&self, handle: &str) -> Result<Profile> {
        let url = self.endpoint(&["users", handle]);
        let user = self
            .get::<payload::User>(url, &[], || format!("User {}", handle))
            .await?;
        Ok(user.into())
    }

    async fn repositories(&self, handle: &str) -> Result<Vec<Repository>> {
        let url = self.endpoint(&["users", handle, "repos"]);
        let query = [
            ("sort", "updated".to_string()),
            ("per_page", Self::MAX_PAGE_SIZE.to_string()),
        ];
        let repos = self
            .get::<Vec<payload::Repo>>(url, &query, || format!("User {}", handle))
            .await?;
        let fetched = repos.len();
        let repos: Vec<Repository> = repos
            .into_iter()
            .filter(|repo| !is_pages_repository(&repo.name))
            .map(Repository::from)
            .collect();
        debug!("Fetched {} repositories of {}, {} after filtering", fetched, handle, repos.len());
        Ok(repos)
    }

    async fn repository_languages(&self, owner: &str, repo: &str) -> Result<Vec<LanguageBytes>> {
        let url = self.endpoint(&["repos", owner, repo, "languages"]);
        let languages = self
            .get::<HashMap<String, u64>>(url, &[], || format!("Repository {}/{}", owner, repo))
            .await?;
        Ok(languages
            .into_iter()
            .map(|(name, bytes)| LanguageBytes::new(name, bytes))
            .collect())
    }
}
