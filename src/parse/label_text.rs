use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;
use scraper::Html;

pub fn remove_excess_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s\s+").expect("regex should be valid"));
    re.replace_all(s, " ")
}

/// Turns the raw text between two tags into a display label: entities are
/// decoded, runs of whitespace collapse to one space and the ends are trimmed.
/// Returns `None` when nothing printable is left.
pub fn clean_label(raw: &str) -> Option<Cow<'_, str>> {
    let decoded: Cow<'_, str> = if raw.contains('&') {
        // let html5ever deal with named and numeric entities
        let fragment = Html::parse_fragment(raw);
        Cow::Owned(fragment.root_element().text().collect())
    } else {
        Cow::Borrowed(raw)
    };
    let label = match decoded {
        Cow::Borrowed(s) => remove_excess_whitespace(s.trim()),
        Cow::Owned(s) => Cow::Owned(remove_excess_whitespace(s.trim()).into_owned()),
    };
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}
