//! Common types used throughout the collector
//!
//! Shared enums for photo size variants and retry backoff.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Photo Size
// ============================================================================

/// Named rendition of a photo in the `src` map of a media item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum PhotoSize {
    /// Full resolution upload
    #[default]
    Original,
    /// Twice the large size
    Large2x,
    Large,
    Medium,
    Small,
    Portrait,
    Landscape,
    Tiny,
}

impl PhotoSize {
    /// Every variant, in the order the API documents them
    pub const ALL: [PhotoSize; 8] = [
        PhotoSize::Original,
        PhotoSize::Large2x,
        PhotoSize::Large,
        PhotoSize::Medium,
        PhotoSize::Small,
        PhotoSize::Portrait,
        PhotoSize::Landscape,
        PhotoSize::Tiny,
    ];

    /// Key used in the `src` object
    pub fn as_str(self) -> &'static str {
        match self {
            PhotoSize::Original => "original",
            PhotoSize::Large2x => "large2x",
            PhotoSize::Large => "large",
            PhotoSize::Medium => "medium",
            PhotoSize::Small => "small",
            PhotoSize::Portrait => "portrait",
            PhotoSize::Landscape => "landscape",
            PhotoSize::Tiny => "tiny",
        }
    }
}

impl fmt::Display for PhotoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhotoSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PhotoSize::ALL
            .into_iter()
            .find(|size| size.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = PhotoSize::ALL.iter().map(|s| s.as_str()).collect();
                format!("unknown photo size '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy between retry attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Delay grows by the base delay on every failed attempt
    #[default]
    Linear,
    /// Delay doubles on every failed attempt
    Exponential,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("original", PhotoSize::Original)]
    #[test_case("large2x", PhotoSize::Large2x)]
    #[test_case("LARGE", PhotoSize::Large)]
    #[test_case(" tiny ", PhotoSize::Tiny)]
    #[test_case("landscape", PhotoSize::Landscape)]
    fn test_photo_size_from_str(input: &str, expected: PhotoSize) {
        assert_eq!(input.parse::<PhotoSize>().unwrap(), expected);
    }

    #[test]
    fn test_photo_size_unknown() {
        let err = "huge".parse::<PhotoSize>().unwrap_err();
        assert!(err.contains("huge"));
        assert!(err.contains("large2x"));
    }

    #[test]
    fn test_photo_size_display_matches_serde() {
        for size in PhotoSize::ALL {
            let json = serde_json::to_string(&size).unwrap();
            assert_eq!(json, format!("\"{size}\""));
        }
    }

    #[test]
    fn test_backoff_default_is_linear() {
        assert_eq!(BackoffType::default(), BackoffType::Linear);
    }
}
