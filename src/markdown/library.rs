// comrak-backed markdown renderer.
// GFM extensions with newline-sensitive rendering; raw HTML in the README is kept.

use comrak::{Options, markdown_to_html};

use super::MarkdownRenderer;

pub struct LibraryRenderer {
    options: Options<'static>,
}

impl LibraryRenderer {
    pub fn new() -> Self {
        let mut options = Options::default();

        let ext = &mut options.extension;
        ext.strikethrough = true;
        ext.tagfilter = false;
        ext.table = true;
        ext.autolink = true;
        ext.tasklist = true;

        let render = &mut options.render;
        render.hardbreaks = true;
        render.github_pre_lang = true;
        render.r#unsafe = true;

        Self { options }
    }
}

impl Default for LibraryRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for LibraryRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown_to_html(markdown, &self.options)
    }
}
