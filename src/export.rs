use std::path::Path;

use async_stream::try_stream;
use futures::{Stream, TryStreamExt};

use crate::{
    google_photos::{ListResponse, MediaItem},
    Error,
};

const HEADER: &str = "Filename";

/// Anything that serves the media library one page at a time.
#[allow(async_fn_in_trait)]
pub trait MediaSource {
    async fn list_page(&self, page_token: Option<&str>) -> Result<ListResponse, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportResult {
    Written(usize),
    Empty,
}

/// Streams every media item, following continuation tokens until a page
/// comes back without one.
pub fn list_media_items<S: MediaSource>(
    source: &S,
) -> impl Stream<Item = Result<MediaItem, Error>> + '_ {
    let mut next_page_token: Option<String> = None;

    try_stream! {
        loop {
            let res = source.list_page(next_page_token.as_deref()).await?;
            tracing::debug!(items = res.media_items.len(), "Fetched media items page");

            for item in res.media_items.into_iter() {
                yield item;
            }

            match res.next_page_token {
                Some(t) if !t.is_empty() => next_page_token = Some(t),
                _ => break,
            };
        }
    }
}

pub async fn collect_filenames<S: MediaSource>(source: &S) -> Result<Vec<String>, Error> {
    list_media_items(source)
        .map_ok(|item| item.filename)
        .try_collect()
        .await
}

/// Creates or truncates `path` and writes the header followed by one row per
/// filename.
pub fn write_filenames(path: &Path, filenames: &[String]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)?;
    wtr.write_record([HEADER])?;

    for name in filenames {
        wtr.write_record([name])?;
        tracing::info!("Saved filename: {name}");
    }

    wtr.flush()?;
    Ok(())
}

/// Lists the whole library and writes the filenames to `output`. No file is
/// created when the library is empty.
pub async fn export_filenames<S: MediaSource>(
    source: &S,
    output: &Path,
) -> Result<ExportResult, Error> {
    let filenames = collect_filenames(source).await?;

    if filenames.is_empty() {
        tracing::info!("No media items found.");
        return Ok(ExportResult::Empty);
    }

    write_filenames(output, &filenames).map_err(|source| Error::FileWrite {
        path: output.to_owned(),
        source,
    })?;

    Ok(ExportResult::Written(filenames.len()))
}
