use std::{
    cell::RefCell,
    io,
    path::{Path, PathBuf},
};

use tokio::fs;
use unwrap_or::unwrap_ok_or;

use crate::google_photos::{unix_now, AuthError, Credential};

/// The two ways of getting a fresh credential from the authorization server.
#[allow(async_fn_in_trait)]
pub trait Authorizer {
    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError>;

    /// Interactive consent, blocking until the user finishes it.
    async fn authorize(&self) -> Result<Credential, AuthError>;
}

/// Credential persisted as JSON at a fixed path.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when nothing has been stored yet.
    pub async fn load(&self) -> Result<Option<Credential>, AuthError> {
        let bytes = unwrap_ok_or!(fs::read(&self.path).await, e, {
            return match e.kind() {
                io::ErrorKind::NotFound => Ok(None),
                _ => Err(AuthError::Read {
                    path: self.path.clone(),
                    source: e,
                }),
            };
        });

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| AuthError::CorruptCredential {
                path: self.path.clone(),
                source,
            })
    }

    /// Overwrites the stored credential. On Unix the file is only readable by
    /// its owner.
    pub async fn save(&self, credential: &Credential) -> Result<(), AuthError> {
        let write_err = |source: io::Error| AuthError::Write {
            path: self.path.clone(),
            source,
        };

        let contents = serde_json::to_vec_pretty(credential).map_err(|e| write_err(e.into()))?;
        fs::write(&self.path, contents).await.map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(write_err)?;
        }

        Ok(())
    }
}

/// Returns a valid credential, refreshing the stored one or running the
/// interactive flow as needed. New or refreshed credentials are stored before
/// they are returned.
pub async fn obtain_credential<A: Authorizer>(
    store: &CredentialStore,
    authorizer: &A,
) -> Result<Credential, AuthError> {
    let stored = store.load().await?;
    let now = unix_now()?;

    let credential = match stored {
        Some(c) if c.is_valid(now) => {
            tracing::debug!(path = %store.path().display(), "Using stored credential");
            return Ok(c);
        }
        Some(c) if c.can_refresh(now) => {
            tracing::info!("Refreshing expired credential");
            authorizer.refresh(&c).await?
        }
        _ => {
            tracing::info!("No valid credential found, starting authorization flow");
            authorizer.authorize().await?
        }
    };

    store.save(&credential).await?;
    tracing::debug!(path = %store.path().display(), "Stored credential");

    Ok(credential)
}

/// A credential that is checked before every request and refreshed (and
/// stored again) once it lapses.
pub struct Session<A> {
    store: CredentialStore,
    authorizer: A,
    credential: RefCell<Credential>,
}

impl<A: Authorizer> Session<A> {
    pub fn new(store: CredentialStore, authorizer: A, credential: Credential) -> Self {
        Self {
            store,
            authorizer,
            credential: RefCell::new(credential),
        }
    }

    pub async fn get_auth_header(&self) -> Result<String, AuthError> {
        let current = self.credential.borrow().clone();
        let now = unix_now()?;

        if current.is_valid(now) {
            return Ok(current.auth_header());
        }

        if !current.can_refresh(now) {
            return Err(AuthError::Expired);
        }

        tracing::info!("Refreshing expired credential");
        let fresh = self.authorizer.refresh(&current).await?;
        self.store.save(&fresh).await?;

        let header = fresh.auth_header();
        *self.credential.borrow_mut() = fresh;
        Ok(header)
    }
}
