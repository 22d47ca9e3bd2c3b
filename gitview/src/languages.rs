use crate::api::{LanguageBytes, Repository};
use derive_more::Constructor;
use std::collections::HashMap;

/// Number of languages kept in the ranked summary.
pub const TOP_LANGUAGES: usize = 10;

/// Swatch for languages missing from the color table.
pub const DEFAULT_COLOR: &str = "#8b5cf6";

#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct LanguageShare {
    pub name: String,
    /// Number of repositories reporting this language as primary.
    pub count: u32,
    /// Share of `count` among repositories that report any language.
    pub percentage: f64,
    pub color: &'static str,
}

/// Ranked top [`TOP_LANGUAGES`] languages of `repos`.
pub fn top_languages(repos: &[Repository]) -> Vec<LanguageShare> {
    let mut languages = language_distribution(repos);
    languages.truncate(TOP_LANGUAGES);
    languages
}

/// Returns every primary language of `repos` ranked by repository count.
///
/// Repositories without a language are left out of both the counts and the total the
/// percentages are computed against. Languages with equal counts keep the order in which
/// they first appear in `repos`.
pub fn language_distribution(repos: &[Repository]) -> Vec<LanguageShare> {
    let mut counts: Vec<(&str, u32)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for language in repos
        .iter()
        .filter_map(|repo| repo.language.as_deref())
        .filter(|language| !language.is_empty())
    {
        match positions.get(language) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(language, counts.len());
                counts.push((language, 1));
            }
        }
    }

    let total: u32 = counts.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }

    // stable, so ties stay in first-seen order
    counts.sort_by(|(_, a), (_, b)| b.cmp(a));
    counts
        .into_iter()
        .map(|(name, count)| {
            let percentage = calculate_percentage(count as u64, total as u64);
            LanguageShare::new(name.to_string(), count, percentage, language_color(name))
        })
        .collect()
}

/// Byte share of each language of a single repository, largest first.
pub fn byte_shares(mut languages: Vec<LanguageBytes>) -> Vec<(LanguageBytes, f64)> {
    let total: u64 = languages.iter().map(|language| language.bytes).sum();
    if total == 0 {
        return Vec::new();
    }
    languages.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
    languages
        .into_iter()
        .map(|language| {
            let percentage = calculate_percentage(language.bytes, total);
            (language, percentage)
        })
        .collect()
}

fn calculate_percentage(part: u64, total: u64) -> f64 {
    100.0 * part as f64 / total as f64
}

pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "C++" => "#f34b7d",
        "C" => "#555555",
        "C#" => "#239120",
        "PHP" => "#4F5D95",
        "Ruby" => "#701516",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "Swift" => "#ffac45",
        "Kotlin" => "#F18E33",
        "Dart" => "#00B4AB",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "SCSS" => "#c6538c",
        "Vue" => "#4FC08D",
        "React" => "#61DAFB",
        "Angular" => "#DD0031",
        "Shell" => "#89e051",
        "PowerShell" => "#012456",
        "Dockerfile" => "#384d54",
        "JSON" => "#292929",
        "YAML" => "#cb171e",
        "Markdown" => "#083fa1",
        _ => DEFAULT_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::repo;
    use rand::seq::SliceRandom;
    use rand::Rng;

    const LANGUAGES: [&str; 14] = [
        "Rust", "Go", "C", "C++", "Python", "TypeScript", "JavaScript", "Ruby", "Java", "Kotlin", "Swift",
        "Haskell", "Elixir", "Zig",
    ];

    fn repos_with(languages: &[Option<&str>]) -> Vec<Repository> {
        languages
            .iter()
            .enumerate()
            .map(|(i, language)| repo(i as u64, &format!("repo_{}", i), *language))
            .collect()
    }

    fn random_repos() -> Vec<Repository> {
        let mut rng = rand::thread_rng();
        let len = rng.gen_range(0..=100);
        let languages: Vec<Option<&str>> = (0..len)
            .map(|_| {
                if rng.gen_bool(0.2) {
                    None
                } else {
                    LANGUAGES.choose(&mut rng).copied()
                }
            })
            .collect();
        repos_with(&languages)
    }

    #[test]
    fn ranks_languages_by_count() {
        let repos = repos_with(&[Some("TypeScript"), Some("TypeScript"), Some("Python")]);
        let languages = top_languages(&repos);

        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0].name, "TypeScript");
        assert_eq!(languages[0].count, 2);
        assert!((languages[0].percentage - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", languages[0].percentage), "66.67");
        assert_eq!(languages[0].color, "#2b7489");
        assert_eq!(languages[1].name, "Python");
        assert_eq!(languages[1].count, 1);
        assert_eq!(format!("{:.2}", languages[1].percentage), "33.33");
    }

    #[test]
    fn repositories_without_language_are_not_counted() {
        let repos = repos_with(&[Some("Rust"), None, Some(""), Some("Go"), None]);
        let languages = language_distribution(&repos);

        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0].percentage, 50.0);
        assert_eq!(languages[1].percentage, 50.0);
    }

    #[test]
    fn empty_summary_without_languages() {
        assert!(top_languages(&[]).is_empty());
        assert!(top_languages(&repos_with(&[None, None, Some("")])).is_empty());
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let repos = repos_with(&[Some("Go"), Some("Rust"), Some("C"), Some("Rust"), Some("C"), Some("Go")]);
        let names: Vec<String> = top_languages(&repos).into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Go", "Rust", "C"]);
    }

    #[test]
    fn truncates_to_top_languages() {
        let mut languages = Vec::new();
        for (i, language) in LANGUAGES.iter().enumerate() {
            // Rust gets 14 repositories, Zig just one
            for _ in 0..LANGUAGES.len() - i {
                languages.push(Some(*language));
            }
        }
        let top = top_languages(&repos_with(&languages));

        assert_eq!(top.len(), TOP_LANGUAGES);
        assert_eq!(top[0].name, "Rust");
        assert_eq!(top[9].name, "Kotlin");
        let total: f64 = top.iter().map(|l| l.percentage).sum();
        assert!(total < 100.0);
    }

    #[test]
    fn distribution_invariants_hold_for_random_repositories() {
        for _ in 0..200 {
            let repos = random_repos();
            let with_language = repos.iter().filter(|r| r.language.is_some()).count();
            let distribution = language_distribution(&repos);

            let counted: u32 = distribution.iter().map(|l| l.count).sum();
            assert_eq!(counted as usize, with_language);
            if with_language > 0 {
                let total: f64 = distribution.iter().map(|l| l.percentage).sum();
                assert!((total - 100.0).abs() <= 1e-9 * 100.0, "percentages sum to {}", total);
            } else {
                assert!(distribution.is_empty());
            }

            let top = top_languages(&repos);
            assert!(top.len() <= TOP_LANGUAGES);
            assert!(top.windows(2).all(|pair| pair[0].count >= pair[1].count));
            assert_eq!(top[..], distribution[..top.len()]);
        }
    }

    #[test]
    fn unknown_language_gets_default_color() {
        assert_eq!(language_color("Rust"), "#dea584");
        assert_eq!(language_color("Brainfuck"), DEFAULT_COLOR);
        assert_eq!(language_color("rust"), DEFAULT_COLOR);
    }

    #[test]
    fn byte_shares_largest_first() {
        let shares = byte_shares(vec![
            LanguageBytes::new("Shell".to_string(), 250),
            LanguageBytes::new("Rust".to_string(), 750),
            LanguageBytes::new("Nix".to_string(), 0),
        ]);
        let names: Vec<&str> = shares.iter().map(|(l, _)| l.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Shell", "Nix"]);
        assert_eq!(shares[0].1, 75.0);
        assert_eq!(shares[1].1, 25.0);
        assert_eq!(shares[2].1, 0.0);

        assert!(byte_shares(Vec::new()).is_empty());
        assert!(byte_shares(vec![LanguageBytes::new("Nix".to_string(), 0)]).is_empty());
    }
}
