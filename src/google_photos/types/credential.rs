use serde::{Deserialize, Serialize};

/// Seconds before the recorded expiry at which a token is already treated as
/// expired, so it does not lapse between the check and the request.
const REFRESH_THRESHOLD: u64 = 225;

/// An OAuth token bundle for the Photos Library API, persisted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds). `None` means the expiry is unknown.
    pub expiry: Option<u64>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Credential {
    pub fn is_expired(&self, now: u64) -> bool {
        match self.expiry {
            None => false,
            Some(exp) => now >= exp.saturating_sub(REFRESH_THRESHOLD),
        }
    }

    pub fn is_valid(&self, now: u64) -> bool {
        !self.access_token.is_empty() && !self.is_expired(now)
    }

    /// An expired credential can be renewed without user interaction only
    /// when it carries a refresh token.
    pub fn can_refresh(&self, now: u64) -> bool {
        self.is_expired(now) && self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[cfg(test)]
pub fn credential_fixture(
    access_token: &str,
    refresh_token: Option<&str>,
    expiry: Option<u64>,
) -> Credential {
    Credential {
        access_token: access_token.into(),
        refresh_token: refresh_token.map(Into::into),
        expiry,
        token_uri: "https://oauth2.googleapis.com/token".into(),
        client_id: "client".into(),
        client_secret: "secret".into(),
        scopes: vec!["https://www.googleapis.com/auth/photoslibrary.readonly".into()],
    }
}
