use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

use super::label_text::clean_label;

/// Opens every dining location section in the upstream markup.
pub const LOCATION_MARKER: &str = r#"<li class="location-name"#;

/// One dining location's slice of a day's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationBlock<'a> {
    pub name: Cow<'a, str>,
    pub body: &'a str,
}

impl<'a> LocationBlock<'a> {
    /// `None` when the piece has no recoverable title.
    pub fn from_piece(piece: &'a str) -> Option<Self> {
        static TITLE_RE: OnceLock<Regex> = OnceLock::new();
        let title_re = TITLE_RE.get_or_init(|| {
            Regex::new(r#"class="cafe-title"[^>]*>([^<]*)<"#).expect("regex should be valid")
        });
        let raw = title_re.captures(piece)?.get(1)?.as_str();
        let name = clean_label(raw)?;
        Some(Self { name, body: piece })
    }
}

/// Every parseable location block, in document order. Content before the
/// first marker is discarded.
pub fn location_blocks(markup: &str) -> impl Iterator<Item = LocationBlock<'_>> {
    markup
        .split(LOCATION_MARKER)
        .skip(1)
        .filter_map(|piece| {
            let block = LocationBlock::from_piece(piece);
            if block.is_none() {
                log::trace!("skipping location block without a title");
            }
            block
        })
}

/// Location blocks whose name is exactly one of `targets`.
pub fn segment_by_location<'a, S: AsRef<str>>(
    markup: &'a str,
    targets: &[S],
) -> Vec<LocationBlock<'a>> {
    location_blocks(markup)
        .filter(|block| targets.iter().any(|t| t.as_ref() == block.name))
        .collect()
}
