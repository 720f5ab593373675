//! Pulls favorite-food answers out of the provider's menu markup.
//!
//! The markup is never parsed into a tree. A day's menu is cut apart on three
//! fixed markers (location, meal period, recipe item) and each piece is read
//! with a small regex. Anything that does not fit is skipped, so a bad day
//! extracts to nothing instead of failing.
mod error;
mod full_menu;
mod label_text;
mod location;
mod matcher;
mod meal;
mod recipe;

pub use error::Error;
pub use full_menu::{extract_full_menu, LocationMenu};
pub use matcher::{FavoritesQuery, MatchResult};
pub use recipe::NoiseFilter;
