// Repository cards.
// Fork filtering, sort orders, and the per-repository card markup.

use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;

use crate::github::Repository;

use super::escape_html;

/// Swatch color for languages missing from the table.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#858585";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#2b7489"),
    ("Python", "#3572a5"),
    ("Java", "#b07219"),
    ("C", "#555555"),
    ("CSS", "#563d7c"),
    ("HTML", "#e34c26"),
    ("Go", "#00add8"),
    ("Rust", "#ce422b"),
    ("Ruby", "#cc342d"),
    ("PHP", "#777bb4"),
    ("Swift", "#fa7343"),
    ("Kotlin", "#7f52ff"),
    ("Dart", "#00b4ab"),
    ("Shell", "#89e051"),
    ("Dockerfile", "#384d54"),
    ("JSON", "#292929"),
];

/// Order of the repository list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    /// Keep the API's order (most recently updated first).
    #[default]
    Updated,
    /// Name, ascending, ignoring case.
    Name,
    /// Star count, descending.
    Stars,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Updated => "updated",
            SortOrder::Name => "name",
            SortOrder::Stars => "stars",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Updated => "Recently updated",
            SortOrder::Name => "Name",
            SortOrder::Stars => "Stars",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}

/// Case-insensitive name order; on a tie, lowercase sorts first.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Non-fork repositories in the requested order.
///
/// Always derived from the full input, so repeated calls with different orders
/// never compound.
pub fn visible_repositories(repos: &[Repository], sort: SortOrder) -> Vec<&Repository> {
    let mut visible: Vec<&Repository> = repos.iter().filter(|repo| !repo.fork).collect();

    match sort {
        SortOrder::Updated => {}
        SortOrder::Name => visible.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOrder::Stars => visible.sort_by(|a, b| b.stars().cmp(&a.stars())),
    }

    visible
}

pub fn repo_card(repo: &Repository) -> String {
    let language = repo.language.as_deref().unwrap_or("Unknown");
    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("No description provided");

    format!(
        r#"<a href="{url}" target="_blank" class="repo-card">
  <div class="repo-name">{name}</div>
  <div class="repo-description">{description}</div>
  <div class="repo-footer">
    <div class="repo-lang">
      <span class="repo-lang-dot" style="background-color: {color}"></span>
      <span>{language}</span>
    </div>
    <div class="repo-stars"><span>⭐</span><span>{stars}</span></div>
  </div>
</a>"#,
        url = escape_html(&repo.html_url),
        name = escape_html(&repo.name),
        description = escape_html(description),
        color = language_color(language),
        language = escape_html(language),
        stars = repo.stars(),
    )
}

/// Card list markup for the repository container.
pub fn render_repositories(repos: &[Repository], sort: SortOrder) -> String {
    let visible = visible_repositories(repos, sort);
    if visible.is_empty() {
        return r#"<div class="loading">No repositories found</div>"#.to_string();
    }

    visible
        .into_iter()
        .map(repo_card)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, stars: Option<u64>, fork: bool) -> Repository {
        Repository {
            name: name.to_string(),
            description: None,
            language: None,
            stargazers_count: stars,
            fork,
            html_url: format!("https://github.com/octocat/{}", name),
            updated_at: None,
        }
    }

    fn sample() -> Vec<Repository> {
        vec![
            repo("zeta", Some(1), false),
            repo("Alpha", None, false),
            repo("forked", Some(100), true),
            repo("beta", Some(7), false),
            repo("alpha", Some(3), false),
        ]
    }

    fn names(repos: &[&Repository]) -> Vec<String> {
        repos.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_updated_keeps_api_order_without_forks() {
        let repos = sample();
        let visible = visible_repositories(&repos, SortOrder::Updated);
        assert_eq!(names(&visible), vec!["zeta", "Alpha", "beta", "alpha"]);
    }

    #[test]
    fn test_name_order() {
        let repos = sample();
        let visible = visible_repositories(&repos, SortOrder::Name);

        assert!(visible.iter().all(|r| !r.fork));
        assert_eq!(names(&visible), vec!["alpha", "Alpha", "beta", "zeta"]);
        for pair in visible.windows(2) {
            assert!(pair[0].name.to_lowercase() <= pair[1].name.to_lowercase());
        }
    }

    #[test]
    fn test_star_order_treats_missing_as_zero() {
        let repos = sample();
        let visible = visible_repositories(&repos, SortOrder::Stars);

        assert!(visible.iter().all(|r| !r.fork));
        let stars: Vec<u64> = visible.iter().map(|r| r.stars()).collect();
        assert_eq!(stars, vec![7, 3, 1, 0]);
    }

    #[test]
    fn test_sorting_is_not_cumulative() {
        let repos = sample();
        let _ = visible_repositories(&repos, SortOrder::Stars);
        let visible = visible_repositories(&repos, SortOrder::Updated);
        assert_eq!(names(&visible), vec!["zeta", "Alpha", "beta", "alpha"]);
    }

    #[test]
    fn test_language_colors() {
        assert_eq!(language_color("Rust"), "#ce422b");
        assert_eq!(language_color("Zig"), DEFAULT_LANGUAGE_COLOR);
        assert_eq!(language_color("Unknown"), DEFAULT_LANGUAGE_COLOR);
    }

    #[test]
    fn test_card_placeholders_and_escaping() {
        let mut r = repo("<script>", Some(2), false);
        r.description = Some("a & b".to_string());
        let card = repo_card(&r);

        assert!(card.contains("&lt;script&gt;"));
        assert!(card.contains("a &amp; b"));
        assert!(card.contains("<span>Unknown</span>"));
        assert!(card.contains(DEFAULT_LANGUAGE_COLOR));
        assert!(card.contains("<span>2</span>"));

        let plain = repo_card(&repo("plain", None, false));
        assert!(plain.contains("No description provided"));
        assert!(plain.contains("<span>0</span>"));
    }

    #[test]
    fn test_only_forks_shows_placeholder() {
        let repos = vec![repo("forked", Some(1), true)];
        let html = render_repositories(&repos, SortOrder::Name);
        assert!(html.contains("No repositories found"));
    }
}
