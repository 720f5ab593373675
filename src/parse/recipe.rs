use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

use super::label_text::clean_label;
use super::meal::MealBlock;

/// Opens every recipe item inside a meal block.
pub const RECIPE_MARKER: &str = r#"<li class="recip"#;

/// Longest plausible recipe name, in characters. Anything this long or longer
/// is almost always a description that got captured instead of a dish name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NoiseFilter(pub usize);

impl NoiseFilter {
    pub const DEFAULT_LIMIT: usize = 100;

    #[inline]
    #[must_use]
    pub fn accepts(self, name: &str) -> bool {
        name.chars().count() < self.0
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self(Self::DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeEntry<'a> {
    pub name: Cow<'a, str>,
    pub is_plausible_item: bool,
}

impl<'a> RecipeEntry<'a> {
    pub fn from_piece(piece: &'a str, filter: NoiseFilter) -> Option<Self> {
        static NAME_RE: OnceLock<Regex> = OnceLock::new();
        let name_re = NAME_RE
            .get_or_init(|| Regex::new(r"<span[^>]*>([^<]*)<").expect("regex should be valid"));
        let raw = name_re.captures(piece)?.get(1)?.as_str();
        let name = clean_label(raw)?;
        let is_plausible_item = filter.accepts(&name);
        Some(Self {
            name,
            is_plausible_item,
        })
    }
}

/// Every recoverable recipe of a meal, noisy captures included but flagged.
pub fn extract_recipes<'a>(meal: &MealBlock<'a>, filter: NoiseFilter) -> Vec<RecipeEntry<'a>> {
    meal.body
        .split(RECIPE_MARKER)
        .skip(1)
        .filter_map(|piece| RecipeEntry::from_piece(piece, filter))
        .collect()
}
