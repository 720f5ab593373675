use std::fmt::Display;

/// Caller contract violations. Irregular markup is never an error; it just
/// extracts to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    MissingFoods,
    MissingLocations,
    BlankFood,
    TooManyDays { requested: u32, max: u32 },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFoods => write!(f, "At least one favorite food is required"),
            Self::MissingLocations => write!(f, "At least one dining location is required"),
            Self::BlankFood => write!(f, "Favorite foods must not be blank"),
            Self::TooManyDays { requested, max } => {
                write!(f, "Can scan at most {max} days, {requested} requested")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
