#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bookfetch
//!
//! bookfetch looks up books by title. Candidates are found with the Open Library search, the
//! chosen candidate is hydrated with its work and edition details and, optionally, gaps are
//! filled from Google Books. The resulting [`Record`] carries cover image URLs and Amazon
//! product/search links and can be shown as text ([`Record`] implements
//! [`Display`](std::fmt::Display)) or serialized to JSON.
//!
//! Only the Open Library search is required to succeed, every other request is best-effort.

mod api;
mod covers;
mod error;
mod isbn;
mod links;
mod merge;
mod normalize;
mod record;
mod render;
mod service;

use std::path::Path;

use log::trace;

pub use api::{
    google_books::{ImageLinks, IndustryIdentifier, VolumeInfo},
    open_library::choose_candidate,
};
pub use covers::cover_filename;
pub use error::{Enrichment, Error, ErrorKind};
pub use isbn::isbn13_to_isbn10;
pub use links::{build_amazon_urls, build_cover_urls, AmazonDomain};
pub use merge::augment;
pub use normalize::{extract_year, normalize_description, sanitize_filename, DEFAULT_FILENAME_LEN};
pub use record::{Candidate, CoverSize, LinkKind, Record};
pub use service::{FetchOptions, Query, SEARCH_LIMIT};

type Client = reqwest::blocking::Client;

/// Search Open Library for up to `limit` candidates matching the `query`.
///
/// # Errors
///
/// An [`Err`] is returned when the search request fails or the response cannot be parsed.
#[inline]
pub fn search_candidates(query: &Query, limit: usize) -> Result<Vec<Candidate>, Error> {
    trace!("Search candidates for '{}' with limit {limit}", query.title);
    service::search_candidates(&Client::default(), query, limit)
}

/// Look up a single book and build its [`Record`].
///
/// [`None`] is returned when nothing matches the `query`, neither on Open Library nor, when
/// enabled, on Google Books.
///
/// # Errors
///
/// An [`Err`] is returned when the Open Library search request fails or its response cannot be
/// parsed. Failures of any other request only leave the affected fields empty.
#[inline]
pub fn fetch_book_info(query: &Query, options: &FetchOptions) -> Result<Option<Record>, Error> {
    trace!(
        "Fetch book info for '{}' using candidate {}",
        query.title,
        options.pick_index
    );
    service::fetch_book_info(&Client::default(), query, options)
}

/// Download the cover image at `url` to `path`.
///
/// Missing parent directories of `path` are created.
///
/// # Errors
///
/// An [`Err`] is returned when the download fails, including non-success statuses, or the file
/// cannot be written.
#[inline]
pub fn download_cover(url: &str, path: &Path) -> Result<(), Error> {
    trace!("Download cover from '{url}'");
    covers::save_cover(&Client::default(), url, path)
}
