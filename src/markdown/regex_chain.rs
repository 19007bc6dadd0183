// Regex-based markdown renderer.
// A fixed, order-dependent chain of substitutions. Each step sees the output of the
// previous one, so reordering the chain changes the result.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::MarkdownRenderer;

/// Blocks starting with one of these are left unwrapped by the paragraph step.
const BLOCK_PREFIXES: [&str; 5] = ["<h", "<u", "<o", "<p", "&gt;"];

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid markdown regex")
}

static CHAR_REF_RE: Lazy<Regex> =
    Lazy::new(|| re(r"&amp;(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);"));
static H3_RE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^### (.+)$"));
static H2_RE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^## (.+)$"));
static H1_RE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^# (.+)$"));
static HR_RE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^(?:-{3,}|\*{3,}|_{3,})[ \t]*$"));
static BOLD_RE: Lazy<Regex> = Lazy::new(|| re(r"\*\*(.+?)\*\*|__(.+?)__"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| re(r"\*([^*\s][^*\n]*?)\*"));
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| re(r"!\[([^\]]*)\]\(([^)\s]+)\)"));
static LINK_RE: Lazy<Regex> = Lazy::new(|| re(r"\[([^\]]+)\]\(([^)\s]+)\)"));
static FENCE_RE: Lazy<Regex> = Lazy::new(|| re(r"(?s)```([\w+-]*)[ \t]*\n(.*?)\n?```"));
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| re(r"`([^`\n]+)`"));
static UL_ITEM_RE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^[ \t]*[-*+] (.+)$"));
static OL_ITEM_RE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^[ \t]*\d+\. (.+)$"));
static ITEM_RUN_RE: Lazy<Regex> = Lazy::new(|| re(r"(?m)(?:^<li>.*</li>(?:\n|$))+"));
static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| re(r"\n[ \t]*\n\s*"));
static QUOTE_RE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^&gt; ?(.*)$"));

/// Renderer used when no markdown library is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexChainRenderer;

impl MarkdownRenderer for RegexChainRenderer {
    fn render(&self, markdown: &str) -> String {
        let text = markdown.replace("\r\n", "\n");

        let text = escape(&text);
        let text = CHAR_REF_RE.replace_all(&text, "&$1;");

        let text = H3_RE.replace_all(&text, "<h3>$1</h3>");
        let text = H2_RE.replace_all(&text, "<h2>$1</h2>");
        let text = H1_RE.replace_all(&text, "<h1>$1</h1>");
        let text = HR_RE.replace_all(&text, "<hr>");

        let text = BOLD_RE.replace_all(&text, |caps: &Captures| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!("<strong>{}</strong>", inner)
        });
        let text = ITALIC_RE.replace_all(&text, "<em>$1</em>");

        let text = IMAGE_RE.replace_all(&text, r#"<img src="$2" alt="$1">"#);
        let text = LINK_RE.replace_all(&text, r#"<a href="$2" target="_blank">$1</a>"#);

        let text = FENCE_RE.replace_all(&text, |caps: &Captures| match &caps[1] {
            "" => format!("<pre><code>{}</code></pre>", &caps[2]),
            lang => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                lang, &caps[2]
            ),
        });
        let text = INLINE_CODE_RE.replace_all(&text, "<code>$1</code>");

        let text = UL_ITEM_RE.replace_all(&text, "<li>$1</li>");
        let text = wrap_items(&text, "ul");
        let text = OL_ITEM_RE.replace_all(&text, "<li>$1</li>");
        let text = wrap_items(&text, "ol");

        let text = wrap_paragraphs(&text);
        blockquotes(&text)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Wrap each run of consecutive `<li>` lines in `<tag>`, collapsing the run onto one
/// line so later steps no longer see bare `<li>` lines.
fn wrap_items(text: &str, tag: &str) -> String {
    ITEM_RUN_RE
        .replace_all(text, |caps: &Captures| {
            let run = &caps[0];
            let trailing = if run.ends_with('\n') { "\n" } else { "" };
            let items: String = run.lines().collect();
            format!("<{tag}>{items}</{tag}>{trailing}")
        })
        .into_owned()
}

fn wrap_paragraphs(text: &str) -> String {
    BLANK_LINE_RE
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if BLOCK_PREFIXES.iter().any(|prefix| block.starts_with(prefix)) {
                block.to_string()
            } else {
                format!("<p>{}</p>", block)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn blockquotes(text: &str) -> String {
    QUOTE_RE
        .replace_all(text, "<blockquote>$1</blockquote>")
        .replace("</blockquote>\n<blockquote>", "\n")
}
