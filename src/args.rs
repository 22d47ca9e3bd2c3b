use clap::Parser;
use gitview::listing::{LanguageFilter, RepositoryQuery, SortKey};
use secrecy::SecretString;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub username to analyze
    #[clap(env = "GITVIEW_USERNAME", parse(try_from_str = handle_not_blank))]
    pub username: String,

    /// API OAuth access token. Requests are anonymous without it
    #[clap(long, env = "GITHUB_TOKEN")]
    pub api_token: Option<SecretString>,

    /// Repository API URL
    #[clap(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Show only repositories whose name or description contains this text
    #[clap(short, long, env = "GITVIEW_QUERY", default_value = "")]
    pub query: String,

    /// Show only repositories with this primary language, or "all"
    #[clap(short, long, env = "GITVIEW_LANGUAGE", default_value = "all")]
    pub language: LanguageFilter,

    /// Repository order: updated, stars, forks or name
    #[clap(short, long, env = "GITVIEW_SORT", default_value = "updated")]
    pub sort: SortKey,

    /// Also print the language breakdown of one of the user's repositories
    #[clap(long, env = "GITVIEW_REPO_LANGUAGES")]
    pub repo_languages: Option<String>,
}

impl Args {
    pub fn listing_query(&self) -> RepositoryQuery {
        RepositoryQuery::new(self.query.clone(), self.language.clone(), self.sort)
    }
}

fn handle_not_blank(value: &str) -> clap::Result<String, String> {
    let handle = value.trim();
    if handle.is_empty() {
        return Err("Username must not be blank.".to_string());
    }
    Ok(handle.to_string())
}
