use fievar::Fields;
use reqwest::{header::AUTHORIZATION, Client, Response};

use super::{types::*, ApiError};
use crate::{Authorizer, Error, MediaSource, Session};

pub const API_BASE: &str = "https://photoslibrary.googleapis.com/v1";

/// Largest page the `mediaItems.list` endpoint serves.
const PAGE_SIZE: &str = "100";

lazy_static::lazy_static! {
    static ref ITEM_FIELDS: String = MediaItem::fields().join(",");
    static ref LIST_FIELDS: String = format!("mediaItems({}),nextPageToken", ITEM_FIELDS.as_str());
}

/// Photos Library API client. Every request asks the session for a header, so
/// a credential that lapses mid-listing is refreshed before the next page.
pub struct PhotosClient<A> {
    http: Client,
    base_url: String,
    session: Session<A>,
}

impl<A: Authorizer> PhotosClient<A> {
    pub fn new(http: Client, base_url: impl Into<String>, session: Session<A>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }

    async fn list(&self, page_token: Option<&str>) -> Result<Response, Error> {
        let req = self
            .http
            .get(format!("{}/mediaItems", self.base_url))
            .header(AUTHORIZATION, self.session.get_auth_header().await?);

        let req = match page_token {
            None => req.query(&[("fields", LIST_FIELDS.as_str()), ("pageSize", PAGE_SIZE)]),
            Some(t) => req.query(&[
                ("fields", LIST_FIELDS.as_str()),
                ("pageSize", PAGE_SIZE),
                ("pageToken", t),
            ]),
        };

        Ok(req.send().await.map_err(ApiError::from)?)
    }
}

impl<A: Authorizer> MediaSource for PhotosClient<A> {
    async fn list_page(&self, page_token: Option<&str>) -> Result<ListResponse, Error> {
        let res = self.list(page_token).await?;

        Ok(Res::from(res).json().await?)
    }
}
