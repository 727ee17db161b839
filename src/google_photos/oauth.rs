use std::path::PathBuf;

use reqwest::{Client, Url};

use super::{callback, pkce, types::*, utils::unix_now, ApiError, AuthError};
use crate::Authorizer;

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/photoslibrary.readonly"];

pub fn redirect_uri(port: u16) -> String {
    format!("http://127.0.0.1:{port}/")
}

pub fn authorization_url(
    client: &ClientInfo,
    redirect_uri: &str,
    state: &str,
    code_challenge: &str,
) -> Result<Url, AuthError> {
    let scope = SCOPES.join(" ");

    Url::parse_with_params(
        &client.auth_uri,
        &[
            ("response_type", "code"),
            ("client_id", client.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("scope", scope.as_str()),
            ("state", state),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("access_type", "offline"),
        ],
    )
    .map_err(|e| AuthError::InvalidUrl(e.to_string()))
}

pub async fn exchange_code(
    http: &Client,
    client: &ClientInfo,
    code: &str,
    redirect_uri: &str,
    code_verifier: &str,
) -> Result<Credential, AuthError> {
    let token = request_token(
        http,
        &client.token_uri,
        &[
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("code", code),
            ("code_verifier", code_verifier),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
        ],
    )
    .await
    .map_err(AuthError::CodeExchange)?;

    let now = unix_now()?;
    let scopes = match token.scope {
        Some(s) => s.split_whitespace().map(String::from).collect(),
        None => SCOPES.iter().map(|s| s.to_string()).collect(),
    };

    Ok(Credential {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expiry: token.expires_in.map(|s| now + s),
        token_uri: client.token_uri.clone(),
        client_id: client.client_id.clone(),
        client_secret: client.client_secret.clone(),
        scopes,
    })
}

/// Exchanges the credential's refresh token for a new access token.
///
/// Google only sometimes rotates the refresh token; when the response carries
/// none, the old one is kept.
pub async fn refresh(http: &Client, credential: &Credential) -> Result<Credential, AuthError> {
    let token = request_token(
        http,
        &credential.token_uri,
        &[
            ("client_id", credential.client_id.as_str()),
            ("client_secret", credential.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            (
                "refresh_token",
                credential.refresh_token.as_deref().unwrap_or_default(),
            ),
        ],
    )
    .await
    .map_err(AuthError::Refresh)?;

    let now = unix_now()?;

    Ok(Credential {
        access_token: token.access_token,
        refresh_token: token
            .refresh_token
            .or_else(|| credential.refresh_token.clone()),
        expiry: token.expires_in.map(|s| now + s),
        ..credential.clone()
    })
}

async fn request_token(
    http: &Client,
    token_uri: &str,
    form: &[(&str, &str)],
) -> Result<TokenResponse, ApiError> {
    let res = http.post(token_uri).form(form).send().await?;

    Res::from(res).json::<TokenResponse>().await
}

/// Browser based authorization for desktop OAuth clients, with the redirect
/// caught by a listener on a fixed local port.
pub struct InstalledAppFlow {
    http: Client,
    client_secrets: PathBuf,
    port: u16,
}

impl InstalledAppFlow {
    pub fn new(http: Client, client_secrets: impl Into<PathBuf>, port: u16) -> Self {
        Self {
            http,
            client_secrets: client_secrets.into(),
            port,
        }
    }

    /// Blocks until the user has granted (or denied) access in the browser.
    pub async fn run_local_server(&self) -> Result<Credential, AuthError> {
        let client = ClientSecrets::load(&self.client_secrets).await?;

        // listen before the URL is shown
        let listener = callback::bind(self.port).await?;
        let redirect_uri = redirect_uri(self.port);

        let code_verifier = pkce::generate_code_verifier();
        let state = pkce::generate_state();
        let url = authorization_url(
            &client,
            &redirect_uri,
            &state,
            &pkce::generate_code_challenge(&code_verifier),
        )?;

        tracing::info!("Please visit this URL to authorize this application: {url}");
        if let Err(e) = open::that(url.as_str()) {
            tracing::warn!(error = %e, "Could not open a browser");
        }

        let code = callback::wait_for_code(listener, &state).await?;
        exchange_code(&self.http, &client, &code, &redirect_uri, &code_verifier).await
    }
}

impl Authorizer for InstalledAppFlow {
    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError> {
        refresh(&self.http, credential).await
    }

    async fn authorize(&self) -> Result<Credential, AuthError> {
        self.run_local_server().await
    }
}
