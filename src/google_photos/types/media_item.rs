use fievar::Fields;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Fields)]
pub struct MediaItem {
    pub id: String,
    pub filename: String,
    #[serde(rename = "mimeType")]
    #[fievar(name = "mimeType")]
    pub mime_type: Option<String>,
}
