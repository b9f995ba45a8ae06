use log::{debug, info};

use crate::{
    api::{
        google_books::{self, VolumeQuery},
        open_library::{self, choose_candidate, OPENLIB_BASE},
        Client,
    },
    links::{build_amazon_urls, build_cover_urls, AmazonDomain},
    merge::augment,
    record::{Candidate, Record},
    Enrichment, Error,
};

/// Fewest candidates requested from a search.
pub const SEARCH_LIMIT: usize = 5;

/// What to look for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    /// Title, exact or partial.
    pub title: String,
    /// Restrict to an author name.
    pub author: Option<String>,
    /// Restrict to a first publish year.
    pub year: Option<i32>,
}

impl Query {
    /// A query by title only.
    pub fn title<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// How to build a [`Record`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Index of the candidate to use, out of range indexes use the first candidate.
    pub pick_index: usize,
    /// Fill missing fields from Google Books, and fall back to Google Books when Open Library
    /// finds nothing.
    pub use_google: bool,
    /// Optional Google Books API key.
    pub google_api_key: Option<String>,
    /// Storefront used for retailer links.
    pub amazon_domain: AmazonDomain,
}

pub(crate) fn search_candidates<C: Client>(
    client: &C,
    query: &Query,
    limit: usize,
) -> Result<Vec<Candidate>, Error> {
    open_library::search(client, query, limit.max(1))
}

/// Search, select, hydrate, augment and link a single book.
///
/// Only the Open Library search itself is fatal; every other request is best-effort and leaves
/// the affected fields as they were.
pub(crate) fn fetch_book_info<C: Client>(
    client: &C,
    query: &Query,
    options: &FetchOptions,
) -> Result<Option<Record>, Error> {
    let limit = SEARCH_LIMIT.max(options.pick_index.saturating_add(1));
    let candidates = open_library::search(client, query, limit)?;

    let candidate = match choose_candidate(candidates, options.pick_index) {
        Some(candidate) => candidate,
        None if options.use_google => return Ok(fetch_from_google(client, query, options)),
        None => {
            info!("No Open Library candidates for '{}'", query.title);
            return Ok(None);
        }
    };

    let volume_query = VolumeQuery {
        title: Some(candidate.title.clone())
            .filter(|t| !t.is_empty())
            .or_else(|| Some(query.title.clone())),
        author: candidate.author_names.first().cloned(),
        isbn: candidate
            .isbns
            .iter()
            .find(|isbn| matches!(isbn.len(), 10 | 13))
            .cloned(),
    };

    let mut record = hydrate(client, candidate);

    if options.use_google {
        record = augment_with_google(
            client,
            record,
            &volume_query,
            options.google_api_key.as_deref(),
        );
    }

    record.amazon_urls = build_amazon_urls(
        Some(&record.title),
        &record.authors,
        &record.isbns,
        options.amazon_domain,
    );

    Ok(Some(record))
}

/// Builds a [`Record`] from a candidate and the work and edition details.
pub(crate) fn hydrate<C: Client>(client: &C, candidate: Candidate) -> Record {
    let Candidate {
        title,
        author_names,
        first_publish_year,
        work_key,
        edition_keys,
        cover_id,
        isbns,
        ..
    } = candidate;

    let mut description = None;
    let mut subjects = Vec::new();
    let mut publishers = Vec::new();
    let mut publish_date = None;

    if let Some(work_key) = &work_key {
        match Enrichment::from(open_library::fetch_work(client, work_key)) {
            Enrichment::Available(work) => {
                description = work.description().or(description);
                let work_subjects = work.subjects();
                if !work_subjects.is_empty() {
                    subjects = work_subjects;
                }
            }
            Enrichment::Unavailable(reason) => {
                debug!("Work details for '{work_key}' unavailable: {reason}");
            }
        }
    }

    let edition_key = edition_keys.into_iter().next();
    if let Some(edition_key) = &edition_key {
        match Enrichment::from(open_library::fetch_edition(client, edition_key)) {
            Enrichment::Available(edition) => {
                description = edition.description().or(description);
                if let Some(names) = edition.publishers() {
                    publishers = names;
                }
                publish_date = edition.publish_date().map(str::to_owned).or(publish_date);
            }
            Enrichment::Unavailable(reason) => {
                debug!("Edition details for '{edition_key}' unavailable: {reason}");
            }
        }
    }

    let cover_urls = build_cover_urls(cover_id, &isbns);
    let openlibrary_url = work_key
        .as_ref()
        .map(|key| format!("{OPENLIB_BASE}{key}"))
        .or_else(|| {
            edition_key
                .as_ref()
                .map(|key| format!("{OPENLIB_BASE}/books/{key}"))
        });

    Record {
        title,
        authors: author_names,
        first_publish_year,
        publishers,
        publish_date,
        isbns,
        openlibrary_work_key: work_key,
        openlibrary_edition_key: edition_key,
        openlibrary_url,
        description,
        subjects,
        cover_urls,
        ..Record::default()
    }
}

/// Fills the gaps of `record` from Google Books, returning it unchanged when Google Books cannot
/// be reached or has nothing.
pub(crate) fn augment_with_google<C: Client>(
    client: &C,
    record: Record,
    query: &VolumeQuery,
    api_key: Option<&str>,
) -> Record {
    match Enrichment::from(google_books::search(client, query, api_key)) {
        Enrichment::Available(volume) => augment(record, &volume),
        Enrichment::Unavailable(reason) => {
            debug!("Google Books augmentation unavailable: {reason}");
            record
        }
    }
}

fn fetch_from_google<C: Client>(
    client: &C,
    query: &Query,
    options: &FetchOptions,
) -> Option<Record> {
    info!(
        "No Open Library candidates for '{}' - trying Google Books",
        query.title
    );

    let volume_query = VolumeQuery {
        title: Some(query.title.clone()),
        author: query.author.clone(),
        isbn: None,
    };

    match Enrichment::from(google_books::search(
        client,
        &volume_query,
        options.google_api_key.as_deref(),
    )) {
        Enrichment::Available(volume) => {
            let mut record = Record::from(volume);
            record.amazon_urls = build_amazon_urls(
                Some(&record.title),
                &record.authors,
                &record.isbns,
                options.amazon_domain,
            );
            Some(record)
        }
        Enrichment::Unavailable(reason) => {
            debug!("Google Books fallback unavailable: {reason}");
            None
        }
    }
}
