//! Keyword-anchored carving of OCR output into ingredient and nutrition spans.

use crate::domain::label_analysis::entities::{LabelSections, TextSpan};

/// Ingredient anchors, highest priority first.
pub const INGREDIENT_KEYWORDS: [&str; 3] = ["ingredients", "ingredient list", "contains"];

/// Nutrition anchors, highest priority first.
pub const NUTRITION_KEYWORDS: [&str; 9] = [
    "nutrition facts",
    "nutrition information",
    "nutritional information",
    "calories",
    "protein",
    "carbohydrate",
    "fat",
    "sodium",
    "sugar",
];

const INGREDIENTS_WINDOW: usize = 500;
const NUTRITION_WINDOW: usize = 400;
const INGREDIENTS_END_MARKER: &str = "nutrition";

/// Collapses OCR output onto a single line.
///
/// Lines are trimmed and joined with spaces, then every whitespace run
/// becomes one space. Normalizing twice is a no-op.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits label text into ingredient and nutrition candidates.
///
/// The input is normalized first and span offsets refer to
/// `normalize_text(text)`. Both scans are independent and may overlap.
/// Keyword matching folds ASCII case only, so non-ASCII capitals never match
/// a keyword letter.
pub fn segment(text: &str) -> LabelSections {
    let normalized = normalize_text(text);
    // ASCII lowering keeps byte offsets aligned with `normalized`.
    let lowered = normalized.to_ascii_lowercase();

    LabelSections {
        ingredients: ingredients_span(&normalized, &lowered),
        nutrition: nutrition_span(&normalized, &lowered),
    }
}

fn ingredients_span(text: &str, lowered: &str) -> Option<TextSpan> {
    let start = first_keyword(lowered, &INGREDIENT_KEYWORDS)?;
    let mut end = advance_chars(text, start, INGREDIENTS_WINDOW);

    if let Some(offset) = lowered[start..].find(INGREDIENTS_END_MARKER) {
        end = end.min(start + offset);
    }

    trimmed_span(text, start, end)
}

fn nutrition_span(text: &str, lowered: &str) -> Option<TextSpan> {
    let start = first_keyword(lowered, &NUTRITION_KEYWORDS)?;
    let end = advance_chars(text, start, NUTRITION_WINDOW);

    trimmed_span(text, start, end)
}

/// Position of the first keyword, in list order, found anywhere in `lowered`.
fn first_keyword(lowered: &str, keywords: &[&str]) -> Option<usize> {
    keywords.iter().find_map(|keyword| lowered.find(keyword))
}

/// Byte offset `chars` characters after `start`, capped at the end of `text`.
fn advance_chars(text: &str, start: usize, chars: usize) -> usize {
    text[start..]
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| start + offset)
}

fn trimmed_span(text: &str, start: usize, end: usize) -> Option<TextSpan> {
    let window = &text[start..end];
    let leading = window.len() - window.trim_start().len();
    let trimmed = window.trim();

    if trimmed.is_empty() {
        return None;
    }

    let start = start + leading;
    Some(TextSpan {
        start,
        end: start + trimmed.len(),
        text: trimmed.to_string(),
    })
}
