use std::fmt::{Display, Formatter, Result};

#[derive(Debug)]
pub enum Error {
  Reqwest(reqwest::Error),
  Json(serde_json::Error),
  Io(std::io::Error),
  Status(String),
  UnexpectedBody(String),
}

impl std::error::Error for Error {}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Error::Reqwest(e) => std::fmt::Display::fmt(e, f),
      Error::Json(e) => std::fmt::Display::fmt(e, f),
      Error::Io(e) => std::fmt::Display::fmt(e, f),
      Error::Status(e) => std::fmt::Display::fmt(e, f),
      Error::UnexpectedBody(e) => std::fmt::Display::fmt(e, f),
    }
  }
}

impl From<reqwest::Error> for Error {
  fn from(reqwest_error: reqwest::Error) -> Self {
    Error::Reqwest(reqwest_error)
  }
}

impl From<serde_json::Error> for Error {
  fn from(serde_json_error: serde_json::Error) -> Self {
    Error::Json(serde_json_error)
  }
}

impl From<std::io::Error> for Error {
  fn from(io_error: std::io::Error) -> Self {
    Error::Io(io_error)
  }
}
