// ABOUTME: Ordered fallback chains for title, description, canonical and image fields.
// ABOUTME: Each chain is a slice of Sources evaluated in order; the first present value wins.

//! Field sources and fallback chains.
//!
//! Key behaviors:
//! - Sources in a chain are tried in order; evaluation stops at the first hit.
//! - Each source reads only its first matching element; if that value is
//!   blank or missing the chain moves on to the next source.
//! - Attribute values are trimmed; text has whitespace runs collapsed.
//! - Blank values are treated as no match.

use crate::dom::Page;

/// Where a single field value can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Text content of the first element matching a selector.
    Text(&'static str),
    /// An attribute of the first element matching a selector.
    Attr(&'static str, &'static str),
    /// `content` of `<meta name="…">`.
    MetaName(&'static str),
    /// `content` of `<meta property="…">`.
    MetaProperty(&'static str),
}

impl Source {
    pub fn read(&self, page: &Page) -> Option<String> {
        match *self {
            Source::Text(css) => page.first_text(css),
            Source::Attr(css, attr) => page.first_attr(css, attr),
            Source::MetaName(name) => page.meta_by_name(name),
            Source::MetaProperty(property) => page.meta_by_property(property),
        }
    }
}

/// Returns the value of the first source in `chain` that is present on `page`.
pub fn first_of(page: &Page, chain: &[Source]) -> Option<String> {
    chain.iter().find_map(|source| source.read(page))
}

/// Images that look like the article's lead image.
pub const FEATURED_IMAGE_SELECTOR: &str =
    "img[class*=\"featured\"], article img, .post img, .content img";

pub const TITLE_CHAIN: &[Source] = &[Source::Text("title"), Source::Text("h1")];

pub const DESCRIPTION_CHAIN: &[Source] = &[
    Source::MetaName("description"),
    Source::MetaProperty("og:description"),
    Source::MetaName("twitter:description"),
];

pub const CANONICAL_CHAIN: &[Source] = &[
    Source::Attr("link[rel=\"canonical\"]", "href"),
    Source::MetaProperty("og:url"),
];

pub const TWITTER_IMAGE_CHAIN: &[Source] = &[
    Source::MetaName("twitter:image"),
    Source::MetaName("twitter:image:src"),
];

/// Best available image for the page as a whole, used to fill in missing
/// Open Graph and Twitter images.
pub const PAGE_IMAGE_CHAIN: &[Source] = &[
    Source::MetaProperty("og:image"),
    Source::MetaProperty("og:image:url"),
    Source::MetaName("twitter:image"),
    Source::MetaName("twitter:image:src"),
    Source::Attr(FEATURED_IMAGE_SELECTOR, "src"),
    Source::Attr("img", "src"),
];
