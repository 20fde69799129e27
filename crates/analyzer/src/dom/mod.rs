// ABOUTME: DOM query layer over scraper's lenient HTML parser.
// ABOUTME: Exposes tag, attribute, first-match and text queries used by the extractors.

//! HTML parser adapter.
//!
//! The extractors never talk to `scraper` directly; they go through [`Page`],
//! which parses leniently and turns every failed lookup (invalid selector,
//! missing attribute, empty text) into `None`.

pub mod compiled;
mod page;

pub use page::{attr_selector, element_attr, element_text, normalize_whitespace, Page};
