// ABOUTME: Maps extracted metadata to the four category scores using fixed length and presence rules.
// ABOUTME: Produces a new scored record; the extracted input is never mutated.

use crate::model::{CategoryScores, MetadataRecord, OpenGraph, ScoreCategory, TextTag, TwitterCard};

/// Length band for a text tag: `[min, max]` is excellent, shorter needs
/// work, longer is still good.
struct LengthBand {
    min: usize,
    max: usize,
}

const TITLE_BAND: LengthBand = LengthBand { min: 30, max: 60 };
const DESCRIPTION_BAND: LengthBand = LengthBand { min: 120, max: 160 };

fn score_length(tag: &TextTag, band: &LengthBand) -> ScoreCategory {
    if !tag.is_present() {
        return ScoreCategory::Missing;
    }
    match tag.length {
        0 => ScoreCategory::Missing,
        len if len < band.min => ScoreCategory::NeedsWork,
        len if len <= band.max => ScoreCategory::Excellent,
        _ => ScoreCategory::Good,
    }
}

pub fn score_title(title: &TextTag) -> ScoreCategory {
    score_length(title, &TITLE_BAND)
}

pub fn score_description(description: &TextTag) -> ScoreCategory {
    score_length(description, &DESCRIPTION_BAND)
}

/// Title, description and image are mandatory; url and type are the
/// optional pair that lifts a complete card to excellent.
pub fn score_open_graph(og: &OpenGraph) -> ScoreCategory {
    if !og.has_any_core() {
        return ScoreCategory::Missing;
    }
    let mandatory = og.title.is_some() && og.description.is_some() && og.image.is_some();
    let optional = og.url.is_some() && og.kind.is_some();
    match (mandatory, optional) {
        (true, true) => ScoreCategory::Excellent,
        (true, false) => ScoreCategory::Good,
        _ => ScoreCategory::NeedsWork,
    }
}

/// Card, title and description are mandatory; an image lifts it to excellent.
pub fn score_twitter(twitter: &TwitterCard) -> ScoreCategory {
    if !twitter.has_any() {
        return ScoreCategory::Missing;
    }
    let mandatory =
        twitter.card.is_some() && twitter.title.is_some() && twitter.description.is_some();
    match (mandatory, twitter.image.is_some()) {
        (true, true) => ScoreCategory::Excellent,
        (true, false) => ScoreCategory::Good,
        _ => ScoreCategory::NeedsWork,
    }
}

/// Scores `metadata`, returning a copy with every category `score` populated
/// alongside the four top-level values.
///
/// The canonical score is left at `missing`: no rule grades it beyond presence.
pub fn score(metadata: &MetadataRecord) -> (MetadataRecord, CategoryScores) {
    let scores = CategoryScores {
        title: score_title(&metadata.title),
        description: score_description(&metadata.description),
        open_graph: score_open_graph(&metadata.open_graph),
        twitter: score_twitter(&metadata.twitter),
    };

    let mut scored = metadata.clone();
    scored.title.score = scores.title;
    scored.description.score = scores.description;
    scored.open_graph.score = scores.open_graph;
    scored.twitter.score = scores.twitter;

    (scored, scores)
}
