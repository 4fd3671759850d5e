//! Service-layer error shared by reminder and sleep use-cases.

use crate::model::record::RecordId;
use crate::model::sleep_night::SleepValidationError;
use crate::repo::cook_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Name input is empty after trimming.
    EmptyName,
    /// Target record does not exist.
    NotFound(RecordId),
    /// Quality rating outside `-1..=5`.
    InvalidQuality(i64),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but read-back disagreed.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidQuality(value) => {
                write!(f, "quality must be -1 or within 0..=5, got {value}")
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<SleepValidationError> for ServiceError {
    fn from(value: SleepValidationError) -> Self {
        match value {
            SleepValidationError::QualityOutOfRange(quality) => Self::InvalidQuality(quality),
            other => Self::Repo(RepoError::from(other)),
        }
    }
}
