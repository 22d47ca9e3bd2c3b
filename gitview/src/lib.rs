//! GitHub profile analysis
//!
//! # Overview
//!
//! Given a GitHub username, the library fetches the user's profile and their most recently updated
//! repositories (a single API page of up to 100 repositories) and derives the views shown for them:
//! - [`languages`] ranks the primary languages of the repositories by the number of repositories
//!   using them and expresses each as a percentage of the repositories that declare a language.
//!   Only the ten most used languages are kept.
//! - [`listing`] narrows the repository list by free text and language and orders it by last update,
//!   stars, forks or name. Aggregate totals are always computed over the full list.
//! - [`search`] (feature `search`) runs the two requests concurrently and publishes the outcome as a
//!   [`search::SearchState`]. Results of a superseded search never replace the current one.
//!
//! The HTTP side lives behind the [`api::Client`] trait.

pub mod api;
pub mod languages;
pub mod listing;
#[cfg(feature = "search")]
pub mod search;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::{Profile, Repository};
    use chrono::{DateTime, TimeZone, Utc};

    pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    pub fn repo(id: u64, name: &str, language: Option<&str>) -> Repository {
        Repository {
            id,
            name: name.to_string(),
            full_name: format!("octocat/{}", name),
            description: None,
            html_url: format!("https://github.com/octocat/{}", name),
            language: language.map(str::to_string),
            stargazers: 0,
            watchers: 0,
            forks: 0,
            open_issues: 0,
            created_at: at(2020, 1, 1),
            updated_at: at(2020, 1, 1),
            pushed_at: None,
            size: 0,
            topics: Vec::new(),
        }
    }

    #[allow(dead_code)]
    pub fn profile(login: &str) -> Profile {
        Profile {
            login: login.to_string(),
            name: None,
            avatar_url: format!("https://avatars.githubusercontent.com/{}", login),
            html_url: format!("https://github.com/{}", login),
            bio: None,
            company: None,
            location: None,
            blog: None,
            created_at: at(2011, 1, 25),
            public_repos: 0,
            followers: 0,
            following: 0,
            public_gists: 0,
        }
    }
}
