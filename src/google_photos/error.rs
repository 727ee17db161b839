use std::{io, path::PathBuf, time::SystemTimeError};

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by calls to Google endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GoogleAPIError {status} {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors that can occur while obtaining a credential.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Could not read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Could not write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The persisted credential exists but is not a valid credential.
    ///
    /// This is not treated as "no credential": the file is left untouched and
    /// the user has to remove it before re-authenticating.
    #[error("Stored credential '{}' is corrupt: {source}", path.display())]
    CorruptCredential {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid client secrets file '{}': {reason}", path.display())]
    InvalidClientSecrets { path: PathBuf, reason: String },

    #[error("Invalid authorization URL: {0}")]
    InvalidUrl(String),

    #[error("Credential has expired and carries no refresh token")]
    Expired,

    #[error("Token refresh failed: {0}")]
    Refresh(#[source] ApiError),

    #[error("Authorization code exchange failed: {0}")]
    CodeExchange(#[source] ApiError),

    /// The consent screen redirected back with an `error` parameter.
    #[error("Authorization was denied: {0}")]
    Denied(String),

    #[error("Authorization response state does not match the request")]
    StateMismatch,

    #[error("Local callback server failed: {0}")]
    Callback(#[source] io::Error),

    #[error("Local callback server stopped before receiving a response")]
    CallbackClosed,

    #[error("Time went backwards!")]
    Clock(#[from] SystemTimeError),
}
