//! Filling the gaps of an Open Library record with Google Books data.
//!
//! Open Library always wins: scalar fields are only filled when they are missing or empty and
//! list fields only ever grow, keeping the existing order and appending new entries at the end.

use std::collections::HashSet;

use crate::{api::google_books::VolumeInfo, normalize::extract_year, record::Record};

/// Fills the missing fields of `record` from a Google Books volume and returns it.
///
/// - `description`, `publish_date`: filled when missing or empty, trimmed.
/// - `first_publish_year`: when missing, derived from the record's own publish date, or from the
///   volume's publish date when the record has none.
/// - `publishers`, `authors`: replaced only when the record has none, authors are de-duplicated.
/// - `isbns`, `subjects`: new entries appended in the volume's order.
/// - `cover_urls`: each size filled only when the record has no URL for it.
#[must_use]
pub fn augment(mut record: Record, volume: &VolumeInfo) -> Record {
    if is_blank(record.description.as_deref()) {
        if let Some(description) = trimmed(volume.description.as_deref()) {
            record.description = Some(description);
        }
    }

    if is_blank(record.publish_date.as_deref()) {
        if let Some(date) = trimmed(volume.published_date.as_deref()) {
            record.publish_date = Some(date);
        }
    }

    if record.first_publish_year.is_none() {
        record.first_publish_year = record
            .publish_date
            .as_deref()
            .filter(|date| !date.is_empty())
            .or(volume.published_date.as_deref())
            .and_then(extract_year);
    }

    if record.publishers.is_empty() {
        if let Some(publisher) = trimmed(volume.publisher.as_deref()) {
            record.publishers = vec![publisher];
        }
    }

    append_unique(&mut record.isbns, volume.isbns());

    if record.authors.is_empty() {
        append_unique(&mut record.authors, volume.authors.iter().cloned());
    }

    append_unique(&mut record.subjects, volume.categories.iter().cloned());

    for (size, url) in volume.cover_urls() {
        record.cover_urls.entry(size).or_insert(url);
    }

    record
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Appends the items not already in `list`, keeping the order of both.
fn append_unique<I>(list: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = list.iter().cloned().collect();
    for item in items {
        if seen.insert(item.clone()) {
            list.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{append_unique, augment};
    use crate::{
        api::google_books::{ImageLinks, IndustryIdentifier, VolumeInfo},
        record::{CoverSize, Record},
    };

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|&s| s.to_owned()).collect()
    }

    fn identifiers(ids: &[&str]) -> Vec<IndustryIdentifier> {
        ids.iter()
            .map(|&id| IndustryIdentifier {
                kind: None,
                identifier: Some(id.to_owned()),
            })
            .collect()
    }

    fn full_volume() -> VolumeInfo {
        VolumeInfo {
            title: Some("Dune (Google)".to_owned()),
            authors: strings(&["Frank Herbert", "Brian Herbert", "Frank Herbert"]),
            publisher: Some("  Penguin ".to_owned()),
            published_date: Some("2006-03-01".to_owned()),
            industry_identifiers: identifiers(&["0306406152", "978-0-306-40615-7"]),
            description: Some("  From Google. ".to_owned()),
            categories: strings(&["Fiction", "Science fiction"]),
            image_links: Some(ImageLinks {
                small_thumbnail: Some("g-small".to_owned()),
                thumbnail: Some("g-thumb".to_owned()),
                ..ImageLinks::default()
            }),
        }
    }

    fn complete_record() -> Record {
        let mut cover_urls = BTreeMap::new();
        for size in CoverSize::ALL {
            cover_urls.insert(size, format!("ol-{size}"));
        }

        Record {
            title: "Dune".to_owned(),
            authors: strings(&["Frank Herbert"]),
            first_publish_year: Some(1965),
            publishers: strings(&["Chilton Books"]),
            publish_date: Some("1965".to_owned()),
            isbns: strings(&["0306406152"]),
            openlibrary_work_key: Some("/works/OL893415W".to_owned()),
            openlibrary_edition_key: Some("OL26242482M".to_owned()),
            openlibrary_url: Some("https://openlibrary.org/works/OL893415W".to_owned()),
            description: Some("From Open Library.".to_owned()),
            subjects: strings(&["Science fiction"]),
            cover_urls,
            ..Record::default()
        }
    }

    #[test]
    fn populated_scalar_fields_are_never_overwritten() {
        let before = complete_record();
        let after = augment(before.clone(), &full_volume());

        assert_eq!(before.title, after.title);
        assert_eq!(before.description, after.description);
        assert_eq!(before.publish_date, after.publish_date);
        assert_eq!(before.first_publish_year, after.first_publish_year);
        assert_eq!(before.publishers, after.publishers);
        assert_eq!(before.authors, after.authors);
        assert_eq!(before.cover_urls, after.cover_urls);
        assert_eq!(before.openlibrary_url, after.openlibrary_url);
    }

    #[test]
    fn augmenting_twice_changes_nothing_more() {
        let volume = full_volume();
        let once = augment(Record::default(), &volume);
        let twice = augment(once.clone(), &volume);

        assert_eq!(once, twice);
    }

    #[test]
    fn isbns_are_appended_without_duplicates() {
        let record = Record {
            isbns: strings(&["0306406152"]),
            ..Record::default()
        };
        let volume = VolumeInfo {
            industry_identifiers: identifiers(&["0306406152", "9780306406157"]),
            ..VolumeInfo::default()
        };

        let record = augment(record, &volume);
        assert_eq!(strings(&["0306406152", "9780306406157"]), record.isbns);
    }

    #[test]
    fn hyphenated_secondary_isbns_match_existing_ones() {
        let record = Record {
            isbns: strings(&["9780306406157"]),
            ..Record::default()
        };
        let volume = VolumeInfo {
            industry_identifiers: identifiers(&["978-0-306-40615-7", "0-306-40615-2"]),
            ..VolumeInfo::default()
        };

        let record = augment(record, &volume);
        assert_eq!(strings(&["9780306406157", "0306406152"]), record.isbns);
    }

    #[test]
    fn missing_fields_are_filled_and_trimmed() {
        let record = augment(Record::default(), &full_volume());

        assert_eq!(Some("From Google."), record.description.as_deref());
        assert_eq!(Some("2006-03-01"), record.publish_date.as_deref());
        assert_eq!(Some(2006), record.first_publish_year);
        assert_eq!(strings(&["Penguin"]), record.publishers);
        assert_eq!(strings(&["Frank Herbert", "Brian Herbert"]), record.authors);
        assert_eq!(strings(&["Fiction", "Science fiction"]), record.subjects);
        // the title is never taken from the secondary source
        assert_eq!("", record.title);
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let record = Record {
            description: Some(String::new()),
            publish_date: Some(String::new()),
            ..Record::default()
        };

        let record = augment(record, &full_volume());
        assert_eq!(Some("From Google."), record.description.as_deref());
        assert_eq!(Some("2006-03-01"), record.publish_date.as_deref());
    }

    #[test]
    fn year_prefers_the_records_own_publish_date() {
        let record = Record {
            publish_date: Some("March 1984".to_owned()),
            ..Record::default()
        };

        let record = augment(record, &full_volume());
        assert_eq!(Some("March 1984"), record.publish_date.as_deref());
        assert_eq!(Some(1984), record.first_publish_year);
    }

    #[test]
    fn year_is_only_derived_from_the_winning_date() {
        let record = Record {
            publish_date: Some("unknown".to_owned()),
            ..Record::default()
        };

        let record = augment(record, &full_volume());
        // the record's date is kept and has no year, so no year is derived from it
        assert_eq!(Some("unknown"), record.publish_date.as_deref());
        assert_eq!(None, record.first_publish_year);
    }

    #[test]
    fn existing_authors_are_kept_as_is() {
        let record = Record {
            authors: strings(&["F. Herbert", "F. Herbert"]),
            ..Record::default()
        };

        let record = augment(record, &full_volume());
        assert_eq!(strings(&["F. Herbert", "F. Herbert"]), record.authors);
    }

    #[test]
    fn subjects_are_appended_without_duplicates() {
        let record = Record {
            subjects: strings(&["Science fiction", "Arrakis"]),
            ..Record::default()
        };

        let record = augment(record, &full_volume());
        assert_eq!(
            strings(&["Science fiction", "Arrakis", "Fiction"]),
            record.subjects
        );
    }

    #[test]
    fn cover_urls_are_filled_per_size() {
        let mut record = Record::default();
        record
            .cover_urls
            .insert(CoverSize::Large, "ol-large".to_owned());

        let record = augment(record, &full_volume());
        assert_eq!("g-small", record.cover_urls[&CoverSize::Small]);
        assert_eq!("g-thumb", record.cover_urls[&CoverSize::Medium]);
        assert_eq!("ol-large", record.cover_urls[&CoverSize::Large]);
    }

    #[test]
    fn empty_volume_changes_nothing() {
        let before = complete_record();
        assert_eq!(before.clone(), augment(before, &VolumeInfo::default()));
    }

    #[test]
    fn append_unique_keeps_existing_duplicates() {
        let mut list = strings(&["a", "a", "b"]);
        append_unique(&mut list, strings(&["b", "c", "c", "a", "d"]));
        assert_eq!(strings(&["a", "a", "b", "c", "d"]), list);
    }
}
