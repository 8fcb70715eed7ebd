//! Tests for decoder module

use super::*;
use crate::error::Error;
use crate::types::PhotoSize;
use pretty_assertions::assert_eq;
use serde_json::json;

fn photo(id: u64, src: serde_json::Value) -> serde_json::Value {
    json!({ "id": id, "type": "Photo", "photographer": "Someone", "src": src })
}

// ============================================================================
// decode_page Tests
// ============================================================================

#[test]
fn test_decode_full_page() {
    let body = json!({
        "page": 2,
        "per_page": 80,
        "total_results": 163,
        "media": [
            photo(1, json!({"original": "https://img/1.jpeg", "tiny": "https://img/1-t.jpeg"})),
            {"id": 2, "type": "Video", "video_files": []}
        ],
        "next_page": "https://api.pexels.com/v1/collections/abc?page=3&per_page=80",
        "prev_page": "https://api.pexels.com/v1/collections/abc?page=1&per_page=80"
    })
    .to_string();

    let decoded = decode_page("https://api/p2", &body).unwrap();
    let page = decoded.page;

    assert_eq!(page.page, Some(2));
    assert_eq!(page.total_results, Some(163));
    assert_eq!(page.media.len(), 2);
    assert_eq!(page.photo_count(), 1);
    assert_eq!(
        page.next_page(),
        Some("https://api.pexels.com/v1/collections/abc?page=3&per_page=80")
    );
    assert_eq!(decoded.raw["total_results"], 163);

    match &page.media[0] {
        MediaItem::Photo(p) => {
            assert_eq!(p.id, Some(1));
            assert_eq!(p.source(PhotoSize::Original), Some("https://img/1.jpeg"));
            assert_eq!(p.source(PhotoSize::Large), None);
            assert_eq!(p.available_sizes(), vec!["original", "tiny"]);
            assert_eq!(p.photographer.as_deref(), Some("Someone"));
        }
        other => panic!("Expected photo, got {other:?}"),
    }
    assert_eq!(
        page.media[1],
        MediaItem::Other {
            kind: Some("Video".to_string()),
            id: Some(2)
        }
    );
}

#[test]
fn test_decode_last_page_without_next() {
    let decoded = decode_page("u", r#"{"page": 1, "media": [], "next_page": null}"#).unwrap();
    assert!(decoded.page.next_page().is_none());
    assert!(decoded.page.media.is_empty());

    let decoded = decode_page("u", r#"{"media": [], "next_page": ""}"#).unwrap();
    assert!(decoded.page.next_page().is_none());
}

#[test]
fn test_decode_missing_media_defaults_empty() {
    let decoded = decode_page("u", r#"{"page": 1, "total_results": 0}"#).unwrap();
    assert!(decoded.page.media.is_empty());
}

#[test]
fn test_decode_item_without_type_is_other() {
    let decoded = decode_page("u", r#"{"media": [{"id": 9, "src": {"original": "x"}}]}"#).unwrap();
    assert_eq!(
        decoded.page.media,
        vec![MediaItem::Other { kind: None, id: Some(9) }]
    );
}

#[test]
fn test_decode_photo_with_null_src() {
    let decoded = decode_page("u", r#"{"media": [{"id": 3, "type": "Photo", "src": null}]}"#).unwrap();
    match &decoded.page.media[0] {
        MediaItem::Photo(p) => assert!(p.src.is_empty()),
        other => panic!("Expected photo, got {other:?}"),
    }
}

#[test]
fn test_decode_tolerates_mis_shaped_non_photo_fields() {
    let body = json!({
        "media": [
            {"type": "Video", "id": "v-17"},
            {"type": "Video", "id": 5, "url": {"href": "x"}, "src": "not a map"},
            {"type": 3, "id": 6},
            photo(1, json!({"original": "https://img/a"}))
        ]
    })
    .to_string();

    let page = decode_page("u", &body).unwrap().page;

    assert_eq!(
        page.media[..3],
        [
            MediaItem::Other { kind: Some("Video".to_string()), id: None },
            MediaItem::Other { kind: Some("Video".to_string()), id: Some(5) },
            MediaItem::Other { kind: None, id: Some(6) },
        ]
    );
    let extraction = extract_urls(&page.media, PhotoSize::Original);
    assert_eq!(extraction.urls, vec!["https://img/a"]);
    assert_eq!(extraction.skipped, 3);
}

#[test]
fn test_decode_photo_ignores_bad_metadata() {
    let body = r#"{"media": [{"type": "Photo", "id": 7, "photographer": 7, "url": [1], "src": {"tiny": "https://img/t"}}]}"#;

    let page = decode_page("u", body).unwrap().page;

    match &page.media[0] {
        MediaItem::Photo(p) => {
            assert_eq!(p.id, Some(7));
            assert_eq!(p.photographer, None);
            assert_eq!(p.url, None);
            assert_eq!(p.source(PhotoSize::Tiny), Some("https://img/t"));
        }
        other => panic!("Expected photo, got {other:?}"),
    }
}

#[test]
fn test_decode_photo_with_non_object_src_fails() {
    let err = decode_page("u", r#"{"media": [{"type": "Photo", "id": 8, "src": "oops"}]}"#)
        .unwrap_err();
    assert!(matches!(err, Error::Parse { ref message, .. } if message.contains("src")));
}

#[test]
fn test_decode_invalid_json() {
    let err = decode_page("https://api/p1", "<html>oops</html>").unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("https://api/p1"));
}

#[test]
fn test_decode_non_object() {
    let err = decode_page("u", "[1, 2, 3]").unwrap_err();
    assert!(matches!(err, Error::Parse { ref message, .. } if message.contains("object")));
}

#[test]
fn test_decode_wrong_shape() {
    let err = decode_page("u", r#"{"media": "not a list"}"#).unwrap_err();
    assert!(err.is_parse());

    let err = decode_page("u", r#"{"media": [], "next_page": 5}"#).unwrap_err();
    assert!(err.is_parse());
}

// ============================================================================
// extract_urls Tests
// ============================================================================

fn media(items: serde_json::Value) -> Vec<MediaItem> {
    serde_json::from_value(items).unwrap()
}

#[test]
fn test_extract_preserves_order_and_duplicates() {
    let items = media(json!([
        photo(1, json!({"original": "https://img/a"})),
        photo(2, json!({"original": "https://img/b"})),
        photo(3, json!({"original": "https://img/a"})),
    ]));

    let extraction = extract_urls(&items, PhotoSize::Original);
    assert_eq!(
        extraction.urls,
        vec!["https://img/a", "https://img/b", "https://img/a"]
    );
    assert_eq!(extraction.photos, 3);
    assert!(extraction.missing.is_empty());
}

#[test]
fn test_extract_skips_non_photos() {
    let items = media(json!([
        {"id": 10, "type": "Video"},
        photo(11, json!({"large": "https://img/l"})),
        {"id": 12, "type": "Video"},
    ]));

    let extraction = extract_urls(&items, PhotoSize::Large);
    assert_eq!(extraction.urls, vec!["https://img/l"]);
    assert_eq!(extraction.skipped, 2);
    assert_eq!(extraction.photos, 1);
    assert!(extraction.urls.len() <= extraction.photos);
}

#[test]
fn test_extract_records_missing_variant() {
    let items = media(json!([
        photo(21, json!({"original": "https://img/o", "medium": "https://img/m"})),
        photo(22, json!({"small": "https://img/s", "original": ""})),
    ]));

    let extraction = extract_urls(&items, PhotoSize::Medium);
    assert_eq!(extraction.urls, vec!["https://img/m"]);
    assert_eq!(
        extraction.missing,
        vec![MissingVariant {
            photo_id: Some(22),
            requested: PhotoSize::Medium,
            available: vec!["original".to_string(), "small".to_string()],
        }]
    );

    // Empty strings count as missing
    let extraction = extract_urls(&items, PhotoSize::Original);
    assert_eq!(extraction.urls, vec!["https://img/o"]);
    assert_eq!(extraction.missing.len(), 1);
}

#[test]
fn test_missing_variant_display() {
    let missing = MissingVariant {
        photo_id: Some(42),
        requested: PhotoSize::Large2x,
        available: vec!["tiny".to_string(), "small".to_string()],
    };
    assert_eq!(
        missing.to_string(),
        "Photo with ID 42 does not have size 'large2x'. Available sizes: [tiny, small]"
    );
}

#[test]
fn test_extract_empty() {
    let extraction = extract_urls(&[], PhotoSize::Original);
    assert_eq!(extraction, Extraction::default());
}
