use crate::api::Repository;
use derive_more::Constructor;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;
use strum_macros::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    Only(String),
}

impl LanguageFilter {
    pub fn matches(&self, repo: &Repository) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(language) => repo.language.as_deref() == Some(language.as_str()),
        }
    }
}

impl FromStr for LanguageFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(LanguageFilter::All)
        } else {
            Ok(LanguageFilter::Only(s.to_string()))
        }
    }
}

impl Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageFilter::All => f.write_str("all"),
            LanguageFilter::Only(language) => f.write_str(language),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    /// Most recently updated first
    #[default]
    Updated,
    /// Most stars first
    Stars,
    /// Most forks first
    Forks,
    /// Alphabetical, see [`compare_names`]
    Name,
}

impl SortKey {
    pub fn compare(&self, a: &Repository, b: &Repository) -> Ordering {
        match self {
            SortKey::Updated => b.updated_at.cmp(&a.updated_at),
            SortKey::Stars => b.stargazers.cmp(&a.stargazers),
            SortKey::Forks => b.forks.cmp(&a.forks),
            SortKey::Name => compare_names(&a.name, &b.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Constructor)]
pub struct RepositoryQuery {
    pub text: String,
    pub language: LanguageFilter,
    pub sort: SortKey,
}

impl RepositoryQuery {
    fn matches(&self, repo: &Repository, needle: &str) -> bool {
        let matches_text = needle.is_empty()
            || repo.name.to_lowercase().contains(needle)
            || repo
                .description
                .as_ref()
                .map_or(false, |description| description.to_lowercase().contains(needle));
        matches_text && self.language.matches(repo)
    }
}

/// Repositories of `repos` matching `query`, ordered by `query.sort`.
///
/// Equal sort keys keep the input order.
pub fn filter_and_sort<'a>(repos: &'a [Repository], query: &RepositoryQuery) -> Vec<&'a Repository> {
    let needle = query.text.to_lowercase();
    let mut listed: Vec<&Repository> = repos.iter().filter(|repo| query.matches(repo, &needle)).collect();
    listed.sort_by(|a, b| query.sort.compare(a, b));
    listed
}

/// Orders names case-insensitively, lowercase before uppercase when names differ only in case.
///
/// Letters are compared by their Unicode lowercase form code point by code point, so
/// `apple` < `Banana` < `Zebra` and `apple` < `Apple`. Names identical under both rules
/// fall back to byte order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<char>>();
    folded(a)
        .cmp(&folded(b))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

/// Summary counters over the whole repository set, ignoring any active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Constructor)]
pub struct Totals {
    pub repositories: usize,
    pub stars: u64,
    pub forks: u64,
}

impl Totals {
    pub fn of(repos: &[Repository]) -> Self {
        repos.iter().fold(Totals::default(), |totals, repo| Totals {
            repositories: totals.repositories + 1,
            stars: totals.stars + repo.stargazers as u64,
            forks: totals.forks + repo.forks as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, repo};

    fn names(listed: &[&Repository]) -> Vec<String> {
        listed.iter().map(|repo| repo.name.clone()).collect()
    }

    fn sample() -> Vec<Repository> {
        let mut cli = repo(1, "cli", Some("Rust"));
        cli.description = Some("Command line PARSER".to_string());
        cli.stargazers = 10;
        cli.forks = 1;
        cli.updated_at = at(2024, 3, 1);

        let mut web = repo(2, "web-app", Some("TypeScript"));
        web.description = Some("Frontend".to_string());
        web.stargazers = 30;
        web.forks = 5;
        web.updated_at = at(2024, 5, 1);

        let mut notes = repo(3, "notes", None);
        notes.stargazers = 0;
        notes.forks = 7;
        notes.updated_at = at(2023, 1, 1);

        let mut parser = repo(4, "Parser", Some("Rust"));
        parser.stargazers = 30;
        parser.forks = 0;
        parser.updated_at = at(2024, 4, 1);

        vec![cli, web, notes, parser]
    }

    #[test]
    fn default_query_sorts_by_update() {
        let repos = sample();
        let listed = filter_and_sort(&repos, &RepositoryQuery::default());
        assert_eq!(names(&listed), vec!["web-app", "Parser", "cli", "notes"]);
    }

    #[test]
    fn text_matches_name_or_description_ignoring_case() {
        let repos = sample();
        let query = RepositoryQuery::new("parser".to_string(), LanguageFilter::All, SortKey::Name);
        assert_eq!(names(&filter_and_sort(&repos, &query)), vec!["cli", "Parser"]);

        let query = RepositoryQuery::new("NOTE".to_string(), LanguageFilter::All, SortKey::Name);
        assert_eq!(names(&filter_and_sort(&repos, &query)), vec!["notes"]);

        let query = RepositoryQuery::new("frontend".to_string(), LanguageFilter::All, SortKey::Name);
        assert_eq!(names(&filter_and_sort(&repos, &query)), vec!["web-app"]);
    }

    #[test]
    fn language_filter_excludes_other_and_missing_languages() {
        let repos = sample();
        let query = RepositoryQuery::new(String::new(), "Rust".parse().unwrap(), SortKey::Updated);
        let listed = filter_and_sort(&repos, &query);
        assert_eq!(names(&listed), vec!["Parser", "cli"]);
        assert!(listed.iter().all(|repo| repo.language.as_deref() == Some("Rust")));

        let query = RepositoryQuery::new(String::new(), "rust".parse().unwrap(), SortKey::Updated);
        assert!(filter_and_sort(&repos, &query).is_empty());

        let query = RepositoryQuery::new(String::new(), "all".parse().unwrap(), SortKey::Updated);
        assert_eq!(filter_and_sort(&repos, &query).len(), repos.len());
    }

    #[test]
    fn descending_sorts_are_stable() {
        let repos = sample();
        let query = RepositoryQuery::new(String::new(), LanguageFilter::All, SortKey::Stars);
        assert_eq!(names(&filter_and_sort(&repos, &query)), vec!["web-app", "Parser", "cli", "notes"]);

        let query = RepositoryQuery::new(String::new(), LanguageFilter::All, SortKey::Forks);
        assert_eq!(names(&filter_and_sort(&repos, &query)), vec!["notes", "web-app", "cli", "Parser"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let repos = vec![
            repo(1, "Zebra", None),
            repo(2, "apple", None),
            repo(3, "Banana", None),
            repo(4, "Apple", None),
        ];
        let query = RepositoryQuery::new(String::new(), LanguageFilter::All, SortKey::Name);
        assert_eq!(names(&filter_and_sort(&repos, &query)), vec!["apple", "Apple", "Banana", "Zebra"]);
    }

    #[test]
    fn compare_names_total_order() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zebra", "banana"), Ordering::Greater);
        assert_eq!(compare_names("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_names("app", "apple"), Ordering::Less);
        assert_eq!(compare_names("Rust", "Rust"), Ordering::Equal);
    }

    #[test]
    fn sort_key_parses_lowercase_names() {
        assert_eq!("updated".parse::<SortKey>().unwrap(), SortKey::Updated);
        assert_eq!("stars".parse::<SortKey>().unwrap(), SortKey::Stars);
        assert_eq!("forks".parse::<SortKey>().unwrap(), SortKey::Forks);
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert!("size".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Stars.to_string(), "stars");
    }

    #[test]
    fn totals_ignore_filters() {
        let repos = sample();
        assert_eq!(Totals::of(&repos), Totals::new(4, 70, 13));
        assert_eq!(Totals::of(&[]), Totals::default());
    }
}
