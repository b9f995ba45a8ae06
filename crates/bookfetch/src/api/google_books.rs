use std::collections::{BTreeMap, HashSet};

use log::{info, trace};
use serde::Deserialize;

use crate::{
    isbn::{strip_hyphens, unhyphenated_len},
    normalize::extract_year,
    record::{CoverSize, Record},
    Error, ErrorKind,
};

use super::{url_with_params, Client};

const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";
const MAX_RESULTS: &str = "5";

/// Search terms for the Google Books volumes endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct VolumeQuery {
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) isbn: Option<String>,
}

impl VolumeQuery {
    /// Google Books search syntax, e.g. `isbn:0441013597 intitle:Dune inauthor:Herbert`.
    fn q(&self) -> String {
        let terms = [
            ("isbn:", &self.isbn),
            ("intitle:", &self.title),
            ("inauthor:", &self.author),
        ];

        terms
            .iter()
            .filter_map(|(prefix, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{prefix}{v}"))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Searches Google Books and returns the volume information of the first item.
pub(crate) fn search<C: Client>(
    client: &C,
    query: &VolumeQuery,
    api_key: Option<&str>,
) -> Result<VolumeInfo, Error> {
    info!("Searching for {query:?} using Google Books API");

    let q = query.q();
    let mut params = vec![("q", q.as_str()), ("maxResults", MAX_RESULTS)];
    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        params.push(("key", key));
    }

    let url = url_with_params(GOOGLE_BOOKS_URL, params)?;
    let GoogleModel { items } = client.get_json(&url)?;

    trace!("Request was successful");

    items
        .into_iter()
        .next()
        .and_then(|item| item.volume_info)
        .filter(|info| *info != VolumeInfo::default())
        .ok_or_else(|| Error::new(ErrorKind::NoValue, "No books found!"))
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Item {
    #[serde(rename = "volumeInfo")]
    volume_info: Option<VolumeInfo>,
}

/// Volume information from the Google Books API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    /// Title of the volume.
    pub title: Option<String>,
    /// Author names.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Publisher name.
    pub publisher: Option<String>,
    /// Free form publish date, usually `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub published_date: Option<String>,
    /// ISBNs and other identifiers.
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    /// Summary text.
    pub description: Option<String>,
    /// Categories, used as subjects.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Thumbnail links.
    pub image_links: Option<ImageLinks>,
}

/// An identifier of a volume such as an ISBN-13.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct IndustryIdentifier {
    /// Kind of identifier, e.g. `ISBN_13`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The identifier itself.
    pub identifier: Option<String>,
}

/// Links to cover images of a volume.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub extra_large: Option<String>,
}

impl VolumeInfo {
    /// ISBN-10 and ISBN-13 identifiers without hyphens, in order and without duplicates.
    #[must_use]
    pub fn isbns(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.industry_identifiers
            .iter()
            .filter_map(|id| id.identifier.as_deref())
            .filter(|id| matches!(unhyphenated_len(id), 10 | 13))
            .map(strip_hyphens)
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    /// Maps the image links onto cover sizes, taking the closest available link for each size.
    #[must_use]
    pub fn cover_urls(&self) -> BTreeMap<CoverSize, String> {
        let mut urls = BTreeMap::new();
        let links = match &self.image_links {
            Some(links) => links,
            None => return urls,
        };

        let candidates = [
            (CoverSize::Small, [&links.small_thumbnail, &links.thumbnail, &None, &None]),
            (CoverSize::Medium, [&links.medium, &links.thumbnail, &links.small, &None]),
            (
                CoverSize::Large,
                [&links.extra_large, &links.large, &links.medium, &links.thumbnail],
            ),
        ];

        for (size, choices) in candidates {
            if let Some(url) = first_link(&choices) {
                urls.insert(size, url);
            }
        }
        urls
    }
}

fn first_link(links: &[&Option<String>]) -> Option<String> {
    links
        .iter()
        .copied()
        .flatten()
        .find(|link| !link.is_empty())
        .cloned()
}

impl From<VolumeInfo> for Record {
    fn from(info: VolumeInfo) -> Self {
        let isbns = info.isbns();
        let cover_urls = info.cover_urls();
        let first_publish_year = info.published_date.as_deref().and_then(extract_year);

        let VolumeInfo {
            title,
            authors,
            publisher,
            published_date,
            description,
            categories,
            ..
        } = info;

        Self {
            title: title.unwrap_or_default(),
            authors,
            first_publish_year,
            publishers: publisher.filter(|p| !p.is_empty()).into_iter().collect(),
            publish_date: published_date.filter(|d| !d.is_empty()),
            isbns,
            description: description.filter(|d| !d.trim().is_empty()),
            subjects: categories,
            cover_urls,
            ..Self::default()
        }
    }
}
