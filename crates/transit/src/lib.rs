use std::error::Error;

use thiserror::Error;

pub mod client;
pub mod database;
pub mod feed;
pub mod information;
pub mod route;
pub mod seed;
pub mod server;
pub mod state;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("the requested element does not exist")]
    NotFound,
    #[error("the element has no id")]
    IdMissing,
    #[error("no line named {0:?}")]
    UnknownLine(String),
    #[error("the line is still referenced by stations")]
    LineInUse,
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("{0}")]
    Other(Box<dyn Error + Send + Sync>),
}

impl RequestError {
    pub fn other<T: Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl From<Box<dyn Error + Send + Sync>> for RequestError {
    fn from(value: Box<dyn Error + Send + Sync>) -> Self {
        RequestError::Other(value)
    }
}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::NotFound => Self::NotFound,
            database::DatabaseError::IdMissing => Self::IdMissing,
            database::DatabaseError::ForeignKeyViolation => Self::LineInUse,
            database::DatabaseError::Other(why) => Self::Other(why),
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;

pub fn not_found_to_none<O>(result: RequestResult<O>) -> RequestResult<Option<O>> {
    if let Err(RequestError::NotFound) = result {
        Ok(None)
    } else {
        result.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_becomes_none() {
        let result: RequestResult<u32> = Err(RequestError::NotFound);
        assert!(matches!(not_found_to_none(result), Ok(None)));
        assert!(matches!(not_found_to_none(Ok(3)), Ok(Some(3))));
        let result: RequestResult<u32> = Err(RequestError::IdMissing);
        assert!(matches!(not_found_to_none(result), Err(RequestError::IdMissing)));
    }

    #[test]
    fn foreign_key_violation_means_line_in_use() {
        let error: RequestError = database::DatabaseError::ForeignKeyViolation.into();
        assert!(matches!(error, RequestError::LineInUse));
    }
}
