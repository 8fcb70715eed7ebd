//! Pagination module
//!
//! # Overview
//!
//! The walker asks a [`Paginator`] after every page whether another page
//! follows. Collections link their next page in the response body, so the
//! only strategy is [`NextUrlPaginator`], optionally capped by [`PageLimit`].

mod strategies;
mod types;

pub use strategies::{NextUrlPaginator, PageLimit};
pub use types::{extract_path, NextPage, PaginationState, Paginator};
