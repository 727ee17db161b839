use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::google_photos::AuthError;

const AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth client descriptor as downloaded from the Google Cloud console.
///
/// Desktop clients are stored under `installed`, web clients under `web`.
#[derive(Debug, Deserialize)]
pub struct ClientSecrets {
    installed: Option<ClientInfo>,
    web: Option<ClientInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    AUTH_URI.into()
}

fn default_token_uri() -> String {
    TOKEN_URI.into()
}

impl ClientSecrets {
    pub async fn load(path: &Path) -> Result<ClientInfo, AuthError> {
        let bytes = fs::read(path).await.map_err(|source| AuthError::Read {
            path: path.to_owned(),
            source,
        })?;

        Self::parse(&bytes).map_err(|reason| AuthError::InvalidClientSecrets {
            path: path.to_owned(),
            reason,
        })
    }

    fn parse(bytes: &[u8]) -> Result<ClientInfo, String> {
        let secrets = serde_json::from_slice::<ClientSecrets>(bytes).map_err(|e| e.to_string())?;

        secrets
            .installed
            .or(secrets.web)
            .ok_or_else(|| "expected an `installed` or `web` client".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installed_client_is_read() {
        let info = ClientSecrets::parse(
            br#"{"installed": {
                "client_id": "id.apps.googleusercontent.com",
                "client_secret": "shh",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token",
                "redirect_uris": ["http://localhost"]
            }}"#,
        )
        .unwrap();

        assert_eq!(info.client_id, "id.apps.googleusercontent.com");
        assert_eq!(info.client_secret, "shh");
        assert_eq!(info.redirect_uris, ["http://localhost"]);
    }

    #[test]
    fn web_client_falls_back_to_default_endpoints() {
        let info = ClientSecrets::parse(br#"{"web": {"client_id": "id", "client_secret": "s"}}"#)
            .unwrap();

        assert_eq!(info.auth_uri, AUTH_URI);
        assert_eq!(info.token_uri, TOKEN_URI);
    }

    #[test]
    fn descriptor_without_client_is_rejected() {
        assert!(matches!(ClientSecrets::parse(b"{}"), Err(_)));
        assert!(matches!(ClientSecrets::parse(b"not json"), Err(_)));
    }
}
