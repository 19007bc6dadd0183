// Markdown rendering module.
// Converts the profile README to HTML with a selectable conversion strategy.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod library;
pub mod regex_chain;

pub use library::LibraryRenderer;
pub use regex_chain::RegexChainRenderer;

/// Converts markdown source into an HTML fragment.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// Where the README's HTML comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownMode {
    /// Built-in regex substitution chain.
    Local,
    /// comrak, GFM with hard line breaks.
    #[default]
    Library,
    /// GitHub's `/markdown` endpoint, applied while fetching.
    Remote,
}

impl MarkdownMode {
    /// Renderer for markdown that still needs local conversion under this mode.
    ///
    /// Remote mode normally receives HTML already; markdown cached under another
    /// mode is handed to the library renderer.
    pub fn renderer(&self) -> Box<dyn MarkdownRenderer> {
        match self {
            MarkdownMode::Local => Box::new(RegexChainRenderer),
            MarkdownMode::Library | MarkdownMode::Remote => Box::new(LibraryRenderer::new()),
        }
    }
}

impl fmt::Display for MarkdownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarkdownMode::Local => "local",
            MarkdownMode::Library => "library",
            MarkdownMode::Remote => "remote",
        };
        f.write_str(name)
    }
}
