use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    InvalidTimeOfDay(String),
    UnknownUnit(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimeOfDay(raw) => write!(f, "`{}` is not a valid time of day", raw),
            Self::UnknownUnit(raw) => write!(f, "`{}` is not a recognized time unit", raw),
        }
    }
}

impl std::error::Error for Error {}
