use std::path::PathBuf;

use thiserror::Error;

use crate::domain::profile::ProfileRecord;

pub mod csv;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub trait ProfileWriter {
    /// Persists `records` found for `company` and returns where they went.
    fn write_profiles(&self, company: &str, records: &[ProfileRecord])
    -> RepositoryResult<PathBuf>;
}
