use log::{info, trace};
use serde::Deserialize;
use serde_json::Value;

use crate::{normalize::normalize_description, record::Candidate, service::Query, Error};

use super::{url_with_params, Client};

const OPENLIB_SEARCH_URL: &str = "https://openlibrary.org/search.json";
pub(crate) const OPENLIB_BASE: &str = "https://openlibrary.org";

/// Searches Open Library by title, optionally narrowed by author and first publish year.
///
/// At most `limit` candidates are returned, in the order given by Open Library.
pub(crate) fn search<C: Client>(
    client: &C,
    query: &Query,
    limit: usize,
) -> Result<Vec<Candidate>, Error> {
    info!("Searching for title '{}' using Open Library", query.title);

    let limit_param = limit.to_string();
    let year_param = query.year.map(|year| year.to_string());

    let mut params = vec![("title", query.title.as_str()), ("limit", limit_param.as_str())];
    if let Some(author) = query.author.as_deref().filter(|a| !a.is_empty()) {
        params.push(("author", author));
    }
    if let Some(year) = year_param.as_deref() {
        params.push(("first_publish_year", year));
    }

    let url = url_with_params(OPENLIB_SEARCH_URL, params)?;
    let SearchModel { docs } = client.get_json(&url)?;

    trace!("Request was successful with {} docs", docs.len());

    Ok(docs
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, doc)| doc.into_candidate(index))
        .collect())
}

/// Fetches the work level details, e.g. `/works/OL45804W`.
pub(crate) fn fetch_work<C: Client>(client: &C, work_key: &str) -> Result<Work, Error> {
    trace!("Fetching work details for '{work_key}'");
    client.get_json(&format!("{OPENLIB_BASE}{work_key}.json"))
}

/// Fetches the edition level details, e.g. `OL7353617M`.
pub(crate) fn fetch_edition<C: Client>(client: &C, edition_key: &str) -> Result<Edition, Error> {
    trace!("Fetching edition details for '{edition_key}'");
    client.get_json(&format!("{OPENLIB_BASE}/books/{edition_key}.json"))
}

/// Picks the candidate at `index`, or the first candidate when `index` is out of range.
#[must_use]
pub fn choose_candidate(mut candidates: Vec<Candidate>, index: usize) -> Option<Candidate> {
    if index < candidates.len() {
        Some(candidates.swap_remove(index))
    } else {
        candidates.into_iter().next()
    }
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct SearchModel {
    #[serde(default)]
    docs: Vec<Doc>,
}

/// A single search hit, most fields can be missing or `null`.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Doc {
    key: Option<String>,
    title: Option<String>,
    title_suggest: Option<String>,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<i32>,
    edition_key: Option<Vec<String>>,
    cover_i: Option<i64>,
    isbn: Option<Vec<String>>,
}

impl Doc {
    fn into_candidate(self, index: usize) -> Candidate {
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .or(self.title_suggest)
            .unwrap_or_default();

        Candidate {
            index,
            title,
            author_names: self.author_name.unwrap_or_default(),
            first_publish_year: self.first_publish_year,
            work_key: self.key,
            edition_keys: self.edition_key.unwrap_or_default(),
            // Open Library uses -1 for "no cover".
            cover_id: self.cover_i.and_then(|id| u64::try_from(id).ok()),
            isbns: self.isbn.unwrap_or_default(),
        }
    }
}

/// Work level details.
#[derive(Deserialize, Default)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct Work {
    description: Option<Value>,
    subjects: Option<Vec<Value>>,
}

impl Work {
    pub(crate) fn description(&self) -> Option<String> {
        self.description.as_ref().and_then(normalize_description)
    }

    pub(crate) fn subjects(&self) -> Vec<String> {
        self.subjects
            .iter()
            .flatten()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    }
}

/// Edition level details.
#[derive(Deserialize, Default)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct Edition {
    description: Option<Value>,
    notes: Option<Value>,
    publishers: Option<Vec<Value>>,
    publish_date: Option<String>,
}

impl Edition {
    /// The edition description, falling back to the edition notes.
    pub(crate) fn description(&self) -> Option<String> {
        self.description
            .as_ref()
            .and_then(normalize_description)
            .or_else(|| self.notes.as_ref().and_then(normalize_description))
    }

    /// Publishers are usually plain names but older records use `{"name": ..}` objects.
    pub(crate) fn publishers(&self) -> Option<Vec<String>> {
        self.publishers.as_ref().map(|publishers| {
            publishers
                .iter()
                .map(|publisher| match publisher {
                    Value::String(name) => name.clone(),
                    Value::Object(map) => match map.get("name") {
                        Some(Value::String(name)) => name.clone(),
                        Some(other) => other.to_string(),
                        None => publisher.to_string(),
                    },
                    other => other.to_string(),
                })
                .collect()
        })
    }

    pub(crate) fn publish_date(&self) -> Option<&str> {
        self.publish_date.as_deref().filter(|date| !date.is_empty())
    }
}
