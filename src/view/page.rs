// Page assembly.
// Wraps the rendered fragments into a single self-contained, themed HTML document.

use chrono::{DateTime, Utc};

use crate::cache::DashboardData;
use crate::github::ProfileDocument;
use crate::markdown::MarkdownMode;
use crate::theme::Theme;

use super::cards::{SortOrder, render_repositories};
use super::escape_html;
use super::stats::Stats;

const NO_README: &str = "<p>No README found for profile.</p>";

const STYLE: &str = r#"
:root { --bg: #ffffff; --fg: #1f2328; --muted: #59636e; --card: #f6f8fa; --border: #d1d9e0; --accent: #0969da; }
[data-theme="dark"] { --bg: #0d1117; --fg: #e6edf3; --muted: #9198a1; --card: #161b22; --border: #3d444d; --accent: #4493f8; }
* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; background: var(--bg); color: var(--fg); }
header { display: flex; align-items: center; justify-content: space-between; padding: 1.5rem 2rem; border-bottom: 1px solid var(--border); }
.profile { display: flex; align-items: center; gap: 1rem; }
.profile img { width: 64px; height: 64px; border-radius: 50%; }
.profile .bio { color: var(--muted); margin: 0.25rem 0 0; }
.theme-btn { font-size: 1.25rem; background: none; border: 1px solid var(--border); border-radius: 6px; padding: 0.25rem 0.5rem; }
main { max-width: 1100px; margin: 0 auto; padding: 2rem; }
.stats { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin-bottom: 2rem; }
.stat { background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 1rem; text-align: center; }
.stat-value { font-size: 1.75rem; font-weight: 600; }
.stat-label { color: var(--muted); }
.readme { background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 1.5rem; margin-bottom: 2rem; overflow-x: auto; }
.repos-header { display: flex; align-items: center; justify-content: space-between; }
.repos { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1rem; }
.repo-card { display: flex; flex-direction: column; gap: 0.5rem; padding: 1rem; background: var(--card); border: 1px solid var(--border); border-radius: 8px; color: inherit; text-decoration: none; }
.repo-name { color: var(--accent); font-weight: 600; }
.repo-description { color: var(--muted); flex: 1; }
.repo-footer { display: flex; justify-content: space-between; font-size: 0.875rem; }
.repo-lang { display: flex; align-items: center; gap: 0.375rem; }
.repo-lang-dot { width: 12px; height: 12px; border-radius: 50%; display: inline-block; }
.loading { color: var(--muted); padding: 1rem; }
footer { color: var(--muted); font-size: 0.8rem; text-align: center; padding: 2rem; }
"#;

/// Everything the page needs besides the data itself.
pub struct PageView<'a> {
    pub data: &'a DashboardData,
    pub username: &'a str,
    pub theme: Theme,
    pub sort: SortOrder,
    pub mode: MarkdownMode,
    /// When the data was fetched.
    pub fetched_at: DateTime<Utc>,
}

/// README markup for the document container.
pub fn render_document(document: Option<&ProfileDocument>, mode: MarkdownMode) -> String {
    match document {
        None => NO_README.to_string(),
        Some(ProfileDocument::Html(html)) => html.clone(),
        Some(ProfileDocument::Markdown(markdown)) if markdown.trim().is_empty() => {
            NO_README.to_string()
        }
        Some(ProfileDocument::Markdown(markdown)) => mode.renderer().render(markdown),
    }
}

fn sort_select(active: SortOrder) -> String {
    let options: Vec<String> = [SortOrder::Updated, SortOrder::Name, SortOrder::Stars]
        .iter()
        .map(|order| {
            let selected = if *order == active { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                order.as_str(),
                selected,
                order.label()
            )
        })
        .collect();
    format!(
        r#"<select id="sortSelect" name="sort">{}</select>"#,
        options.join("")
    )
}

fn profile_header(view: &PageView<'_>) -> String {
    let Some(profile) = view.data.profile.as_ref() else {
        return format!("<h1>{}</h1>", escape_html(view.username));
    };

    let display_name = profile.name.as_deref().unwrap_or(&profile.login);
    let avatar = profile
        .avatar_url
        .as_deref()
        .map(|url| format!(r#"<img src="{}" alt="">"#, escape_html(url)))
        .unwrap_or_default();
    let bio = profile
        .bio
        .as_deref()
        .map(|bio| format!(r#"<p class="bio">{}</p>"#, escape_html(bio)))
        .unwrap_or_default();

    format!(
        r#"<div class="profile">{avatar}<div><h1>{name}</h1>{bio}</div></div>"#,
        avatar = avatar,
        name = escape_html(display_name),
        bio = bio,
    )
}

/// The complete dashboard document.
pub fn render_page(view: &PageView<'_>) -> String {
    let stats = Stats::compute(view.data.profile.as_ref(), &view.data.repositories);
    let title = view
        .data
        .profile
        .as_ref()
        .and_then(|p| p.name.as_deref())
        .unwrap_or(view.username);

    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · GitHub</title>
<style>{style}</style>
</head>
<body>
<header>
{header}
<button id="themeBtn" class="theme-btn" type="button" title="Switch theme">{theme_label}</button>
</header>
<main>
<section class="stats">
  <div class="stat"><div class="stat-value" id="totalRepos">{repos}</div><div class="stat-label">Repositories</div></div>
  <div class="stat"><div class="stat-value" id="totalStars">{stars}</div><div class="stat-label">Stars</div></div>
  <div class="stat"><div class="stat-value" id="totalFollowers">{followers}</div><div class="stat-label">Followers</div></div>
</section>
<section class="readme" id="readmeContent">
{readme}
</section>
<section>
<div class="repos-header"><h2>Repositories</h2>{select}</div>
<div class="repos" id="reposList">
{cards}
</div>
</section>
</main>
<footer>Data fetched {fetched_at}</footer>
</body>
</html>
"#,
        theme = view.theme.as_str(),
        title = escape_html(title),
        style = STYLE,
        header = profile_header(view),
        theme_label = view.theme.button_label(),
        repos = stats.repositories,
        stars = stats.stars,
        followers = stats.followers,
        readme = render_document(view.data.document.as_ref(), view.mode),
        select = sort_select(view.sort),
        cards = render_repositories(&view.data.repositories, view.sort),
        fetched_at = view.fetched_at.format("%Y-%m-%d %H:%M UTC"),
    )
}
