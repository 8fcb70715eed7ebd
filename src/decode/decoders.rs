//! Page decoding and URL extraction

use super::types::{Extraction, MediaItem, MissingVariant, PageResponse};
use crate::error::{Error, Result};
use crate::types::PhotoSize;
use serde::Deserialize;
use serde_json::Value;

/// A decoded page: the raw JSON (for the paginator) and its typed view
#[derive(Debug, Clone)]
pub struct DecodedPage {
    pub raw: Value,
    pub page: PageResponse,
}

/// Decode a page body fetched from `url`
///
/// Invalid JSON, a non-object body, or a body whose fields have the wrong
/// shape are all parse errors. They are never retried.
pub fn decode_page(url: &str, body: &str) -> Result<DecodedPage> {
    let raw: Value = serde_json::from_str(body)
        .map_err(|e| Error::parse(url, format!("invalid JSON: {e}")))?;

    if !raw.is_object() {
        return Err(Error::parse(url, "expected a JSON object"));
    }

    let page = PageResponse::deserialize(&raw)
        .map_err(|e| Error::parse(url, format!("unexpected structure: {e}")))?;

    Ok(DecodedPage { raw, page })
}

/// Pull the `size` URL out of every photo in `media`
///
/// Non-photo items are counted and skipped. Photos without the variant are
/// recorded in [`Extraction::missing`] and contribute no URL.
pub fn extract_urls(media: &[MediaItem], size: PhotoSize) -> Extraction {
    let mut extraction = Extraction::default();

    for item in media {
        match item {
            MediaItem::Photo(photo) => {
                extraction.photos += 1;
                match photo.source(size) {
                    Some(url) => extraction.urls.push(url.to_string()),
                    None => extraction.missing.push(MissingVariant {
                        photo_id: photo.id,
                        requested: size,
                        available: photo.available_sizes(),
                    }),
                }
            }
            MediaItem::Other { .. } => extraction.skipped += 1,
        }
    }

    extraction
}
