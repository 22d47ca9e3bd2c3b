pub mod args;
pub mod render;

pub use args::Args;

use gitview::api::{Client, Result};
use gitview::languages::byte_shares;
use gitview::search::{Report, Search};
use github_client::{GithubClient, GithubClientBuilder};
use log::{info, warn};
use render::{ReportView, RepositoryLanguages};
use std::sync::Arc;

pub fn build_client(args: &Args) -> Result<GithubClient> {
    let mut client = GithubClientBuilder::default().with_github_url(&args.api_url);
    if let Some(token) = &args.api_token {
        client = client.try_with_token(token)?;
    }
    client.build()
}

pub async fn search_profile<C: Client>(client: &C, args: &Args) -> Result<Arc<Report>> {
    Search::default().run(client, &args.username).await
}

/// Runs the search described by `args` and renders the result.
///
/// A failed `--repo-languages` lookup is reported after the profile report instead of replacing it.
pub async fn run(args: &Args) -> Result<String> {
    let client = build_client(args)?;
    let report = search_profile(&client, args).await?;
    info!(
        "{} has {} repositories in {} languages",
        report.profile.login,
        report.repositories.len(),
        report.languages.len()
    );
    let query = args.listing_query();
    let mut out = ReportView::new(&report, &query).to_string();

    if let Some(repo) = &args.repo_languages {
        out.push('\n');
        match client.repository_languages(&report.profile.login, repo).await {
            Ok(languages) => out.push_str(&RepositoryLanguages::new(repo, &byte_shares(languages)).to_string()),
            Err(err) => {
                warn!("Failed to get languages of {}: {}", repo, err);
                out.push_str(&format!("Languages of {}: {}\n", repo, err));
            }
        }
    }
    Ok(out)
}
