use std::path::PathBuf;

use thiserror::Error;

use crate::google_photos::{ApiError, AuthError};

/// Everything that can end an export run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthError),

    /// A page fetch failed; the listing is abandoned.
    #[error("Could not list media items: {0}")]
    Network(#[from] ApiError),

    #[error("Could not write '{}': {source}", path.display())]
    FileWrite { path: PathBuf, source: csv::Error },
}
