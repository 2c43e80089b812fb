//! Markdown rendering and sanitization for user submitted content.
//!
//! Uses comrak with GitHub Flavored Markdown extensions. Raw HTML is never
//! passed through: rendering omits it and cleaning strips it from the
//! document tree before formatting back to CommonMark.

use anyhow::{Context, Result};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options};

/// URL schemes that run code when a link is followed.
const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:"];

/// Renders and cleans markdown with GitHub Flavored Markdown extensions.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
}

impl Default for MarkdownRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with tables, strikethrough, autolinks and task lists.
    ///
    /// Raw HTML rendering stays disabled.
    pub fn new() -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;

        options.render.unsafe_ = false;

        Self { options }
    }

    /// Renders markdown content to HTML.
    pub fn to_html(&self, content: &str) -> String {
        comrak::markdown_to_html(content, &self.options)
    }

    /// Removes unsafe constructs from markdown and returns markdown again.
    ///
    /// Drops raw HTML blocks and inline HTML, images with script URLs, and
    /// unwraps links with script URLs so their text survives.
    ///
    /// # Errors
    ///
    /// Returns error if formatting the cleaned document fails
    pub fn clean(&self, content: &str) -> Result<String> {
        let arena = Arena::new();
        let root = comrak::parse_document(&arena, content, &self.options);

        let unsafe_nodes: Vec<&AstNode<'_>> = root
            .descendants()
            .filter(|node| is_unsafe(&node.data.borrow().value))
            .collect();

        for node in unsafe_nodes {
            let is_link = matches!(node.data.borrow().value, NodeValue::Link(_));
            if is_link {
                let children: Vec<_> = node.children().collect();
                for child in children {
                    node.insert_before(child);
                }
            }
            node.detach();
        }

        let mut output = Vec::new();
        comrak::format_commonmark(root, &self.options, &mut output)
            .context("Failed to format cleaned markdown")?;

        String::from_utf8(output).context("Cleaned markdown contains invalid UTF8")
    }
}

fn is_unsafe(value: &NodeValue) -> bool {
    match value {
        NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) => true,
        NodeValue::Link(link) | NodeValue::Image(link) => is_script_url(&link.url),
        _ => false,
    }
}

fn is_script_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    SCRIPT_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// Renders markdown to HTML with the default renderer.
pub fn markdown_to_html(content: &str) -> String {
    MarkdownRenderer::new().to_html(content)
}

/// Cleans markdown with the default renderer.
///
/// # Errors
///
/// Returns error if formatting the cleaned document fails
pub fn markdown_clean(content: &str) -> Result<String> {
    MarkdownRenderer::new().clean(content)
}
