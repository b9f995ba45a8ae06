use std::{collections::BTreeMap, fmt, str::FromStr};

use url::form_urlencoded;

use crate::{
    isbn::{isbn13_to_isbn10, strip_hyphens, unhyphenated_len},
    record::{CoverSize, LinkKind},
    Error, ErrorKind,
};

pub(crate) const OPENLIB_COVER_BASE: &str = "https://covers.openlibrary.org";

/// Country specific Amazon storefront used for retailer links.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AmazonDomain {
    /// amazon.co.jp
    #[default]
    CoJp,
    /// amazon.com
    Com,
    /// amazon.co.uk
    CoUk,
    /// amazon.de
    De,
    /// amazon.fr
    Fr,
    /// amazon.it
    It,
    /// amazon.es
    Es,
    /// amazon.ca
    Ca,
    /// amazon.com.au
    ComAu,
}

impl AmazonDomain {
    /// Every known domain code, the first being the default.
    pub const CODES: [&'static str; 9] = [
        "co.jp", "com", "co.uk", "de", "fr", "it", "es", "ca", "com.au",
    ];

    /// Looks up a domain by its code, falling back to the default domain when the code is
    /// unknown.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }

    /// The domain code, e.g. `co.jp`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CoJp => "co.jp",
            Self::Com => "com",
            Self::CoUk => "co.uk",
            Self::De => "de",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Es => "es",
            Self::Ca => "ca",
            Self::ComAu => "com.au",
        }
    }

    /// The storefront host including the scheme.
    #[must_use]
    pub const fn host(self) -> &'static str {
        match self {
            Self::CoJp => "https://www.amazon.co.jp",
            Self::Com => "https://www.amazon.com",
            Self::CoUk => "https://www.amazon.co.uk",
            Self::De => "https://www.amazon.de",
            Self::Fr => "https://www.amazon.fr",
            Self::It => "https://www.amazon.it",
            Self::Es => "https://www.amazon.es",
            Self::Ca => "https://www.amazon.ca",
            Self::ComAu => "https://www.amazon.com.au",
        }
    }
}

impl fmt::Display for AmazonDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AmazonDomain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "co.jp" => Self::CoJp,
            "com" => Self::Com,
            "co.uk" => Self::CoUk,
            "de" => Self::De,
            "fr" => Self::Fr,
            "it" => Self::It,
            "es" => Self::Es,
            "ca" => Self::Ca,
            "com.au" => Self::ComAu,
            other => {
                return Err(Error::new(
                    ErrorKind::Deserialize,
                    format!("'{other}' is not a known Amazon domain"),
                ))
            }
        })
    }
}

/// Builds Amazon product and search links.
///
/// The product link needs an ISBN-10: the first 10 character identifier is used as is,
/// otherwise the first 13 character identifier is converted with [`isbn13_to_isbn10`]. When no
/// ISBN-10 can be derived there is no product link. The search link is always built from the
/// title and the first author, even when both are missing.
#[must_use]
pub fn build_amazon_urls(
    title: Option<&str>,
    authors: &[String],
    isbns: &[String],
    domain: AmazonDomain,
) -> BTreeMap<LinkKind, String> {
    let base = domain.host();
    let mut urls = BTreeMap::new();

    let isbn10 = isbns
        .iter()
        .find(|isbn| unhyphenated_len(isbn) == 10)
        .map(|isbn| strip_hyphens(isbn))
        .or_else(|| {
            isbns
                .iter()
                .find(|isbn| unhyphenated_len(isbn) == 13)
                .and_then(|isbn| isbn13_to_isbn10(isbn))
        });

    if let Some(isbn10) = isbn10 {
        urls.insert(LinkKind::Product, format!("{base}/dp/{isbn10}"));
    }

    let terms: Vec<&str> = title
        .into_iter()
        .chain(authors.first().map(String::as_str))
        .filter(|term| !term.is_empty())
        .collect();
    let query: String = form_urlencoded::byte_serialize(terms.join(" ").as_bytes()).collect();
    urls.insert(LinkKind::Search, format!("{base}/s?k={query}&i=stripbooks"));

    urls
}

/// Builds Open Library cover URLs for the `s`, `m` and `l` sizes.
///
/// A cover id always wins over ISBNs, even if the ISBN image might be the better one. Without a
/// cover id the first 10 or 13 character ISBN is used and the cover host is asked not to return
/// a placeholder image. With neither the map is empty.
#[must_use]
pub fn build_cover_urls(cover_id: Option<u64>, isbns: &[String]) -> BTreeMap<CoverSize, String> {
    if let Some(id) = cover_id.filter(|&id| id != 0) {
        return CoverSize::ALL
            .into_iter()
            .map(|size| {
                let letter = size.letter();
                (size, format!("{OPENLIB_COVER_BASE}/b/id/{id}-{letter}.jpg"))
            })
            .collect();
    }

    isbns
        .iter()
        .find(|isbn| matches!(isbn.chars().count(), 10 | 13))
        .map(|isbn| {
            CoverSize::ALL
                .into_iter()
                .map(|size| {
                    let letter = size.letter();
                    (
                        size,
                        format!("{OPENLIB_COVER_BASE}/b/isbn/{isbn}-{letter}.jpg?default=false"),
                    )
                })
                .collect::<BTreeMap<_, _>>()
        })
        .unwrap_or_default()
}
