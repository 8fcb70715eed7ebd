//! Wire types for collection pages
//!
//! Media classification is lenient: any item whose `type` is not `"Photo"`
//! (including items with no `type` at all) decodes as [`MediaItem::Other`]
//! instead of failing the page. Item metadata of the wrong type is dropped;
//! only a photo's `src` map can fail decoding.

use crate::types::PhotoSize;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Discriminator value for photos
pub const PHOTO_KIND: &str = "Photo";

/// One page of a collection listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageResponse {
    /// Page number reported by the server
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Total items in the collection
    #[serde(default)]
    pub total_results: Option<u64>,
    /// Items in server order
    #[serde(default)]
    pub media: Vec<MediaItem>,
    /// Absolute URL of the next page, absent on the last one
    #[serde(default)]
    pub next_page: Option<String>,
}

impl PageResponse {
    /// Next page URL, treating an empty string as absent
    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Number of photo items on this page
    pub fn photo_count(&self) -> usize {
        self.media.iter().filter(|item| item.is_photo()).count()
    }
}

/// A media record, tagged by its `type` field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawMediaItem")]
pub enum MediaItem {
    /// `type: "Photo"`
    Photo(Photo),
    /// Any other kind, e.g. `"Video"`
    Other {
        kind: Option<String>,
        id: Option<u64>,
    },
}

impl MediaItem {
    pub fn is_photo(&self) -> bool {
        matches!(self, MediaItem::Photo(_))
    }
}

/// A photo and its size variants
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Photo {
    pub id: Option<u64>,
    /// Variant name to URL; not every photo carries every variant
    pub src: BTreeMap<String, Value>,
    pub photographer: Option<String>,
    /// Photo page on the website
    pub url: Option<String>,
}

impl Photo {
    /// URL of the requested variant, if present and non-empty
    pub fn source(&self, size: PhotoSize) -> Option<&str> {
        self.src
            .get(size.as_str())
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Names of all variants the photo lists
    pub fn available_sizes(&self) -> Vec<String> {
        self.src.keys().cloned().collect()
    }
}

#[derive(Deserialize)]
struct RawMediaItem {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    id: Option<u64>,
    #[serde(default)]
    src: Value,
    #[serde(default, deserialize_with = "lenient")]
    photographer: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    url: Option<String>,
}

/// Accept any JSON for an optional field, keeping it only if it has type `T`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl TryFrom<RawMediaItem> for MediaItem {
    type Error = String;

    fn try_from(raw: RawMediaItem) -> Result<Self, Self::Error> {
        if raw.kind.as_deref() != Some(PHOTO_KIND) {
            return Ok(MediaItem::Other {
                kind: raw.kind,
                id: raw.id,
            });
        }

        let src = match raw.src {
            Value::Null => BTreeMap::new(),
            Value::Object(map) => map.into_iter().collect(),
            other => {
                return Err(format!(
                    "photo {} has a non-object src: {other}",
                    raw.id.map_or_else(|| "without ID".to_string(), |id| id.to_string())
                ))
            }
        };

        Ok(MediaItem::Photo(Photo {
            id: raw.id,
            src,
            photographer: raw.photographer,
            url: raw.url,
        }))
    }
}

/// A photo that lacks the requested size variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingVariant {
    pub photo_id: Option<u64>,
    pub requested: PhotoSize,
    pub available: Vec<String>,
}

impl std::fmt::Display for MissingVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.photo_id {
            Some(id) => write!(f, "Photo with ID {id}")?,
            None => write!(f, "Photo without ID")?,
        }
        write!(
            f,
            " does not have size '{}'. Available sizes: [{}]",
            self.requested,
            self.available.join(", ")
        )
    }
}

/// Outcome of extracting one size variant from a page of media
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Extracted URLs in media order
    pub urls: Vec<String>,
    /// Photos that lacked the variant
    pub missing: Vec<MissingVariant>,
    /// Photo items seen
    pub photos: usize,
    /// Non-photo items skipped
    pub skipped: usize,
}
