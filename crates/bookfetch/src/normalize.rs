//! Normalization of loosely typed fields coming back from the book APIs.

use serde_json::Value;

const FILENAME_FALLBACK: &str = "book";

/// Default maximum length, in characters, of a file name built by [`sanitize_filename`].
pub const DEFAULT_FILENAME_LEN: usize = 64;

/// Extracts a year from a free form date.
///
/// The string is scanned left to right and the first run of four digits that falls within
/// `1000..=2100` is used, so `"1999-04-01"`, `"April 1999"` and `"c. 1999, reprinted"` all give
/// `1999`. Windows outside that range are skipped and scanning continues. Full-width digits, as
/// found in Japanese dates such as `"１９９９年"`, count as digits too.
///
/// # Examples
///
/// ```
/// assert_eq!(Some(1999), bookfetch::extract_year("1999-04-01"));
/// assert_eq!(None, bookfetch::extract_year("unknown"));
/// ```
#[must_use]
pub fn extract_year(date: &str) -> Option<i32> {
    let digits: Vec<Option<i32>> = date.chars().map(digit_value).collect();

    digits
        .windows(4)
        .filter_map(|window| {
            window
                .iter()
                .try_fold(0, |year, digit| digit.map(|d| year * 10 + d))
        })
        .find(|year| (1000..=2100).contains(year))
}

fn digit_value(c: char) -> Option<i32> {
    let value = match c {
        '0'..='9' => u32::from(c) - u32::from('0'),
        '０'..='９' => u32::from(c) - u32::from('０'),
        _ => return None,
    };
    i32::try_from(value).ok()
}

/// Unifies the description shapes used by Open Library.
///
/// A description is either a plain string or an object such as
/// `{"type": "/type/text", "value": "..."}`. Both are trimmed and an empty result is treated as
/// no description. Any other shape gives [`None`].
#[must_use]
pub fn normalize_description(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("value")?.as_str()?,
        _ => return None,
    };

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

/// Turns a title into a safe file name.
///
/// Characters that are invalid on common file systems (`\ / : * ? " < > |`) are removed,
/// whitespace runs become a single `_` and the result is cut to `max_len` characters. An empty
/// title or an empty result gives `book`.
///
/// # Examples
///
/// ```
/// assert_eq!("Dune_Messiah", bookfetch::sanitize_filename("  Dune   Messiah ", 64));
/// assert_eq!("book", bookfetch::sanitize_filename("", 64));
/// ```
#[must_use]
pub fn sanitize_filename(title: &str, max_len: usize) -> String {
    let title = if title.is_empty() {
        FILENAME_FALLBACK
    } else {
        title
    };

    let cleaned: String = title
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();

    let mut name = String::with_capacity(cleaned.len());
    let mut in_whitespace = false;
    for c in cleaned.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }

    if name.is_empty() {
        name.push_str(FILENAME_FALLBACK);
    }
    name.chars().take(max_len).collect()
}
