use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{fetch::InvalidDateStamp, parse};
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Parse(parse::Error),
    Request(reqwest::Error),
    Date(InvalidDateStamp),
    MissingDate,
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e)
    }
}

impl From<InvalidDateStamp> for Error {
    fn from(e: InvalidDateStamp) -> Self {
        Error::Date(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Invalid query: {}", e),
            Error::Request(e) => write!(f, "Request error: {}", e),
            Error::Date(e) => write!(f, "Invalid date: {}", e),
            Error::MissingDate => write!(f, "Date is required"),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Request(e) => {
                log::error!("Error fetching from the menu provider: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch menu data.".to_owned(),
                )
            }
            Error::Parse(_) | Error::Date(_) | Error::MissingDate => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
