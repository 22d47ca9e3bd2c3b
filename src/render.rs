//! Plain text views of a search [`Report`].

use gitview::api::{LanguageBytes, Profile, Repository};
use gitview::languages::LanguageShare;
use gitview::listing::{filter_and_sort, RepositoryQuery, Totals};
use gitview::search::Report;
use std::fmt::{self, Display};

/// Languages listed next to the chart.
pub const TOP_LANGUAGES_PANEL: usize = 5;

const CHART_WIDTH: usize = 40;

/// Full report: profile, languages, totals and the repositories matching `query`.
pub struct ReportView<'a> {
    report: &'a Report,
    query: &'a RepositoryQuery,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a Report, query: &'a RepositoryQuery) -> Self {
        ReportView { report, query }
    }
}

impl Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        write!(f, "{}", ProfileCard(&report.profile))?;
        if !report.languages.is_empty() {
            write!(f, "\n{}\n{}", LanguageChart(&report.languages), TopLanguages(&report.languages))?;
        }
        if !report.repositories.is_empty() {
            let listed = filter_and_sort(&report.repositories, self.query);
            write!(
                f,
                "\n{}\n{}\n{}",
                TotalsLine(&report.totals),
                LanguageFilters::new(&report.languages, self.query),
                RepositoryList(&listed)
            )?;
        }
        Ok(())
    }
}

pub struct ProfileCard<'a>(pub &'a Profile);

impl Display for ProfileCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.0;
        writeln!(f, "{}", profile.display_name())?;
        writeln!(f, "@{}", profile.login)?;
        if let Some(bio) = &profile.bio {
            writeln!(f, "{}", bio)?;
        }
        if let Some(company) = &profile.company {
            writeln!(f, "Company:  {}", company)?;
        }
        if let Some(location) = &profile.location {
            writeln!(f, "Location: {}", location)?;
        }
        if let Some(blog) = &profile.blog {
            writeln!(f, "Blog:     {}", blog_link(blog))?;
        }
        writeln!(f, "Joined {}", profile.created_at.format("%B %Y"))?;
        writeln!(
            f,
            "{} followers · {} following · {} repositories",
            profile.followers, profile.following, profile.public_repos
        )
    }
}

fn blog_link(blog: &str) -> String {
    if blog.starts_with("http") {
        blog.to_string()
    } else {
        format!("https://{}", blog)
    }
}

/// Horizontal bars sized by each language's share of repositories.
pub struct LanguageChart<'a>(pub &'a [LanguageShare]);

impl Display for LanguageChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Languages Used")?;
        let name_width = self.0.iter().map(|l| l.name.chars().count()).max().unwrap_or(0);
        for language in self.0 {
            let filled = ((language.percentage / 100.0) * CHART_WIDTH as f64).round() as usize;
            writeln!(
                f,
                "{:<name_width$}  {:<chart_width$}  {:>5.1}%  {}",
                language.name,
                "█".repeat(filled.max(1)),
                language.percentage,
                language.color,
                name_width = name_width,
                chart_width = CHART_WIDTH,
            )?;
        }
        Ok(())
    }
}

pub struct TopLanguages<'a>(pub &'a [LanguageShare]);

impl Display for TopLanguages<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Top Languages")?;
        for language in self.0.iter().take(TOP_LANGUAGES_PANEL) {
            writeln!(
                f,
                "  {}  {} repos ({:.1}%)",
                language.name, language.count, language.percentage
            )?;
        }
        Ok(())
    }
}

pub struct TotalsLine<'a>(pub &'a Totals);

impl Display for TotalsLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total Repositories: {}   Total Stars: {}   Total Forks: {}",
            self.0.repositories, self.0.stars, self.0.forks
        )
    }
}

/// Active listing options and the values accepted by `--language` for this report.
pub struct LanguageFilters<'a> {
    languages: &'a [LanguageShare],
    query: &'a RepositoryQuery,
}

impl<'a> LanguageFilters<'a> {
    pub fn new(languages: &'a [LanguageShare], query: &'a RepositoryQuery) -> Self {
        LanguageFilters { languages, query }
    }
}

impl Display for LanguageFilters<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.query;
        writeln!(f, "Filter: \"{}\"  Language: {}  Sort: {}", query.text, query.language, query.sort)?;
        write!(f, "Languages: all")?;
        for language in self.languages {
            write!(f, ", {} ({})", language.name, language.count)?;
        }
        writeln!(f)
    }
}

pub struct RepositoryList<'a>(pub &'a [&'a Repository]);

impl Display for RepositoryList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No repositories found matching your criteria.");
        }
        for repo in self.0 {
            write!(f, "{}", RepositoryCard(repo))?;
        }
        Ok(())
    }
}

pub struct RepositoryCard<'a>(pub &'a Repository);

impl Display for RepositoryCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repo = self.0;
        writeln!(f, "\n{}  {}", repo.name, repo.html_url)?;
        if let Some(description) = &repo.description {
            writeln!(f, "  {}", description)?;
        }
        let mut stats = Vec::new();
        if let Some(language) = &repo.language {
            stats.push(language.clone());
        }
        stats.push(format!("★ {}", repo.stargazers));
        stats.push(format!("⑂ {}", repo.forks));
        if repo.open_issues > 0 {
            stats.push(format!("{} open issues", repo.open_issues));
        }
        stats.push(format!("Updated {}", repo.updated_at.format("%b %-d, %Y")));
        writeln!(f, "  {}", stats.join(" · "))?;
        if !repo.topics.is_empty() {
            writeln!(f, "  #{}", repo.topics.join(" #"))?;
        }
        Ok(())
    }
}

/// Byte breakdown printed for `--repo-languages`.
pub struct RepositoryLanguages<'a> {
    repo: &'a str,
    shares: &'a [(LanguageBytes, f64)],
}

impl<'a> RepositoryLanguages<'a> {
    pub fn new(repo: &'a str, shares: &'a [(LanguageBytes, f64)]) -> Self {
        RepositoryLanguages { repo, shares }
    }
}

impl Display for RepositoryLanguages<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Languages of {}", self.repo)?;
        if self.shares.is_empty() {
            writeln!(f, "  No languages detected.")?;
        }
        for (language, percentage) in self.shares {
            writeln!(f, "  {}  {} bytes ({:.1}%)", language.name, language.bytes, percentage)?;
        }
        Ok(())
    }
}
