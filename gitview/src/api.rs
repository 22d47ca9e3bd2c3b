use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(String),
    #[error("API rate limit exceeded{}", reset_suffix(.reset))]
    RateLimited { reset: Option<DateTime<Utc>> },
    #[error("GitHub API error: {status}")]
    Api { status: u16 },
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Username must not be blank")]
    BlankHandle,
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

fn reset_suffix(reset: &Option<DateTime<Utc>>) -> String {
    reset
        .map(|at| format!(" (resets at {})", at.format("%H:%M:%S UTC")))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub created_at: DateTime<Utc>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub public_gists: u32,
}

impl Profile {
    /// Name shown on the profile card, the login when no display name is set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|name| !name.is_empty()).unwrap_or(self.login.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub stargazers: u32,
    pub watchers: u32,
    pub forks: u32,
    pub open_issues: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub size: u64,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct LanguageBytes {
    pub name: String,
    pub bytes: u64,
}

/// GitHub Pages sites are published from `<owner>.github.io` repositories and are not listed as projects.
pub fn is_pages_repository(name: &str) -> bool {
    name.contains(".github.io")
}

#[async_trait]
pub trait Client: Send + Sync {
    /// Largest page the API serves. Only the first page of repositories is ever requested.
    const MAX_PAGE_SIZE: u32;

    async fn profile(&self, handle: &str) -> Result<Profile>;

    /// Repositories of `handle` sorted by last update, without GitHub Pages repositories.
    async fn repositories(&self, handle: &str) -> Result<Vec<Repository>>;

    async fn repository_languages(&self, owner: &str, repo: &str) -> Result<Vec<LanguageBytes>>;
}

#[test]
fn pages_repository_test() {
    assert!(is_pages_repository("octocat.github.io"));
    assert!(is_pages_repository("octocat.github.io-old"));
    assert!(!is_pages_repository("github-io-tools"));
    assert!(!is_pages_repository("Spoon-Knife"));
}

#[test]
fn rate_limited_message_test() {
    use chrono::TimeZone;
    assert_eq!(Error::RateLimited { reset: None }.to_string(), "API rate limit exceeded");
    let reset = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).single();
    assert_eq!(
        Error::RateLimited { reset }.to_string(),
        "API rate limit exceeded (resets at 12:30:00 UTC)"
    );
}
