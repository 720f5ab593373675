use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;

/// The 8-digit `YYYYMMDD` day key the menu provider expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateStamp(pub NaiveDate);

impl DateStamp {
    const FORMAT: &'static str = "%Y%m%d";
}

impl From<NaiveDate> for DateStamp {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Display for DateStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateStamp(String);

impl Display for InvalidDateStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a YYYYMMDD date", self.0)
    }
}

impl std::error::Error for InvalidDateStamp {}

impl FromStr for DateStamp {
    type Err = InvalidDateStamp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono alone would also accept a short year
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidDateStamp(s.to_owned()));
        }
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| InvalidDateStamp(s.to_owned()))
    }
}
