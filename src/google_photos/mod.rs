mod api;
mod callback;
mod error;
mod oauth;
mod pkce;
mod types;
mod utils;

pub use api::*;
pub use error::{ApiError, AuthError};
pub use oauth::{InstalledAppFlow, SCOPES};
pub use types::*;
pub use utils::unix_now;
