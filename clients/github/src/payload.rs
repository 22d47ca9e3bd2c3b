use chrono::{DateTime, Utc};
use gitview::api::{Profile, Repository};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct User {
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
    pub public_gists: u32,
    pub followers: u32,
    pub following: u32,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Profile {
            login: user.login,
            name: non_empty(user.name),
            avatar_url: user.avatar_url,
            html_url: user.html_url,
            bio: non_empty(user.bio),
            company: non_empty(user.company),
            location: non_empty(user.location),
            blog: non_empty(user.blog),
            created_at: user.created_at,
            public_repos: user.public_repos,
            followers: user.followers,
            following: user.following,
            public_gists: user.public_gists,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub watchers_count: u32,
    pub forks_count: u32,
    pub open_issues_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub size: u64,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl From<Repo> for Repository {
    fn from(repo: Repo) -> Self {
        Repository {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            html_url: repo.html_url,
            language: non_empty(repo.language),
            stargazers: repo.stargazers_count,
            watchers: repo.watchers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at: repo.pushed_at,
            size: repo.size,
            topics: repo.topics,
        }
    }
}

/// GitHub sends `""` for some unset profile fields.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
