use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Serialize;

use crate::{Error, ErrorKind};

/// An unconfirmed search hit from Open Library.
///
/// A candidate is only used to pick a single book which is then hydrated into a [`Record`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Position of the candidate in the search results, starting at 0.
    pub index: usize,
    /// Title of the work.
    pub title: String,
    /// Author names in the order given by the search.
    pub author_names: Vec<String>,
    /// Year the work was first published, if known.
    pub first_publish_year: Option<i32>,
    /// Open Library work key, e.g. `/works/OL45804W`.
    pub work_key: Option<String>,
    /// Open Library edition keys, e.g. `OL7353617M`.
    pub edition_keys: Vec<String>,
    /// Open Library cover id.
    pub cover_id: Option<u64>,
    /// ISBN candidates as given by the search.
    pub isbns: Vec<String>,
}

/// Size tag for a cover image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CoverSize {
    /// Small cover, tag `s`.
    #[serde(rename = "s")]
    Small,
    /// Medium cover, tag `m`.
    #[serde(rename = "m")]
    Medium,
    /// Large cover, tag `l`.
    #[serde(rename = "l")]
    Large,
}

impl CoverSize {
    /// All sizes in `s`, `m`, `l` order.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// The lowercase tag used in [`Record::cover_urls`] and in file names.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Small => "s",
            Self::Medium => "m",
            Self::Large => "l",
        }
    }

    /// The uppercase letter used by the Open Library cover host.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Small => 'S',
            Self::Medium => 'M',
            Self::Large => 'L',
        }
    }
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CoverSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" | "S" => Ok(Self::Small),
            "m" | "M" => Ok(Self::Medium),
            "l" | "L" => Ok(Self::Large),
            other => Err(Error::new(
                ErrorKind::Deserialize,
                format!("'{other}' is not a cover size, expected one of s, m, l"),
            )),
        }
    }
}

/// Kind of retailer link.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Direct product page, only when an ISBN-10 is known.
    Product,
    /// Keyword search page, always present once links are built.
    Search,
}

/// The fully hydrated book produced for output.
///
/// Field names are kept flat so that the JSON form is a single object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Title, may be empty.
    pub title: String,
    /// Author names in order.
    pub authors: Vec<String>,
    /// Year of first publication.
    pub first_publish_year: Option<i32>,
    /// Publisher names in order.
    pub publishers: Vec<String>,
    /// Free form publish date, e.g. `1999`, `April 1999`, `1999-04-01`.
    pub publish_date: Option<String>,
    /// ISBNs in order of discovery.
    pub isbns: Vec<String>,
    /// Open Library work key.
    pub openlibrary_work_key: Option<String>,
    /// Open Library edition key.
    pub openlibrary_edition_key: Option<String>,
    /// Canonical Open Library page.
    pub openlibrary_url: Option<String>,
    /// Summary text.
    pub description: Option<String>,
    /// Subjects and categories in order.
    pub subjects: Vec<String>,
    /// Cover image URL by size.
    pub cover_urls: BTreeMap<CoverSize, String>,
    /// Retailer URL by kind.
    pub amazon_urls: BTreeMap<LinkKind, String>,
}
