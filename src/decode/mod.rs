//! Response decoder module
//!
//! # Overview
//!
//! Turns a collection page body into typed media records and extracts a
//! single size variant from every photo on the page.

mod decoders;
mod types;

pub use decoders::{decode_page, extract_urls, DecodedPage};
pub use types::{Extraction, MediaItem, MissingVariant, PageResponse, Photo, PHOTO_KIND};

#[cfg(test)]
mod tests;
