// ABOUTME: Page wrapper around a parsed scraper::Html document.
// ABOUTME: Provides select, first-match, attribute and text helpers that never fail.

use scraper::{ElementRef, Html};

use crate::dom::compiled::get_or_compile;

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds an attribute-match selector such as `meta[name="description"]`.
///
/// Quotes and backslashes in `value` are escaped so arbitrary tag names
/// produce a valid selector.
pub fn attr_selector(tag: &str, attr: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{}[{}=\"{}\"]", tag, attr, escaped)
}

/// Returns the trimmed value of `attr` on `el`, or `None` if missing or blank.
pub fn element_attr(el: &ElementRef<'_>, attr: &str) -> Option<String> {
    let trimmed = el.value().attr(attr)?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Returns the whitespace-normalized text content of `el`, or `None` if blank.
pub fn element_text(el: &ElementRef<'_>) -> Option<String> {
    let text: String = el.text().collect::<Vec<_>>().join(" ");
    let normalized = normalize_whitespace(&text);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// A leniently parsed HTML document.
pub struct Page {
    doc: Html,
}

impl Page {
    /// Parses `html` as a full document. Malformed markup is repaired by the
    /// parser rather than rejected.
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// All elements matching `css`, in document order. Invalid selectors match nothing.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        let Some(sel) = get_or_compile(css) else {
            return Vec::new();
        };
        let matches: Vec<ElementRef<'_>> = self.doc.select(&sel).collect();
        matches
    }

    /// The first element matching `css`.
    pub fn first(&self, css: &str) -> Option<ElementRef<'_>> {
        let sel = get_or_compile(css)?;
        let first = self.doc.select(&sel).next();
        first
    }

    /// The `attr` value of the first element matching `css`.
    ///
    /// Later matches are never consulted: a blank or missing value on the
    /// first match yields `None`.
    pub fn first_attr(&self, css: &str, attr: &str) -> Option<String> {
        self.first(css).and_then(|el| element_attr(&el, attr))
    }

    /// The text content of the first element matching `css`, or `None` if blank.
    pub fn first_text(&self, css: &str) -> Option<String> {
        self.first(css).as_ref().and_then(element_text)
    }

    /// Content of the first `<meta name="…">` tag.
    pub fn meta_by_name(&self, name: &str) -> Option<String> {
        self.first_attr(&attr_selector("meta", "name", name), "content")
    }

    /// Content of the first `<meta property="…">` tag.
    pub fn meta_by_property(&self, property: &str) -> Option<String> {
        self.first_attr(&attr_selector("meta", "property", property), "content")
    }
}
