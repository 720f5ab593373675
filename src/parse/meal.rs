use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

use super::label_text::clean_label;
use super::location::LocationBlock;
use super::recipe::RECIPE_MARKER;

/// Opens every meal period inside a location block. The misspelling is the
/// provider's class name.
pub const MEAL_MARKER: &str = r#"<li class="preiod-name"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealBlock<'a> {
    pub label: Cow<'a, str>,
    pub body: &'a str,
}

impl<'a> MealBlock<'a> {
    /// The label is the first `<season> - <meal>` text node followed directly
    /// by another tag. It is only looked for ahead of the first recipe so that
    /// a hyphenated dish name can never stand in for a missing label.
    pub fn from_piece(piece: &'a str) -> Option<Self> {
        static LABEL_RE: OnceLock<Regex> = OnceLock::new();
        let label_re = LABEL_RE.get_or_init(|| {
            Regex::new(r">\s*([^<>\s][^<>]*?\s-\s[^<>]*?)\s*<").expect("regex should be valid")
        });
        let header = piece
            .find(RECIPE_MARKER)
            .map_or(piece, |end| &piece[..end]);
        let raw = label_re.captures(header)?.get(1)?.as_str();
        let label = normalize_meal_label(raw)?;
        Some(Self { label, body: piece })
    }
}

/// Drops a trailing tag fragment and a leading `<season> - ` prefix, then
/// cleans what is left.
///
/// `"Season - Brunch"` becomes `"Brunch"`.
pub fn normalize_meal_label(raw: &str) -> Option<Cow<'_, str>> {
    static SEASON_PREFIX_RE: OnceLock<Regex> = OnceLock::new();
    let season_prefix_re = SEASON_PREFIX_RE
        .get_or_init(|| Regex::new(r"^[^<>]*?\s-\s").expect("regex should be valid"));
    let raw = raw.split('<').next().unwrap_or_default();
    let raw = season_prefix_re
        .find(raw)
        .map_or(raw, |prefix| &raw[prefix.end()..]);
    clean_label(raw)
}

/// Meal periods of one location, in document order.
pub fn extract_meals<'a>(block: &LocationBlock<'a>) -> Vec<MealBlock<'a>> {
    block
        .body
        .split(MEAL_MARKER)
        .skip(1)
        .filter_map(|piece| {
            let meal = MealBlock::from_piece(piece);
            if meal.is_none() {
                log::trace!("skipping unlabeled meal block in {}", block.name);
            }
            meal
        })
        .collect()
}
