mod client_secrets;
mod credential;
mod media_item;

pub use client_secrets::{ClientInfo, ClientSecrets};
pub use credential::Credential;
#[cfg(test)]
pub use credential::credential_fixture;
pub use media_item::MediaItem;

use reqwest::Response;
use serde::{de::DeserializeOwned, Deserialize};

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

/// One page of `mediaItems.list`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    #[serde(default)]
    pub media_items: Vec<MediaItem>,
    pub next_page_token: Option<String>,
}

pub struct Res(Response);

impl Res {
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let res = self.0;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await?;
            return Err(ApiError::Status { status, body });
        }

        let bytes = res.bytes().await?;
        let t = serde_json::from_slice::<T>(&bytes)?;
        Ok(t)
    }
}

impl From<Response> for Res {
    fn from(r: Response) -> Self {
        Self(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_without_items_is_an_empty_last_page() -> anyhow::Result<()> {
        let page = serde_json::from_str::<ListResponse>("{}")?;

        assert!(page.media_items.is_empty());
        assert!(page.next_page_token.is_none());
        Ok(())
    }

    #[test]
    fn list_response_keeps_item_order() -> anyhow::Result<()> {
        let page = serde_json::from_str::<ListResponse>(
            r#"{
                "mediaItems": [
                    {"id": "a", "filename": "IMG_0001.JPG", "mimeType": "image/jpeg"},
                    {"id": "b", "filename": "VID_0002.MP4"}
                ],
                "nextPageToken": "CAE"
            }"#,
        )?;

        let names: Vec<_> = page.media_items.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, ["IMG_0001.JPG", "VID_0002.MP4"]);
        assert_eq!(page.next_page_token.as_deref(), Some("CAE"));
        Ok(())
    }
}
