use std::fmt;

use crate::record::{CoverSize, LinkKind, Record};

const MAX_ISBNS: usize = 5;
const MAX_SUBJECTS: usize = 8;

/// Human readable multi-line summary, one `Label: value` line per known field with the
/// description last.
///
/// Only known fields are written, ISBNs are cut to the first five and subjects to the first
/// eight with a trailing `...` when there are more. There is no trailing newline.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Title: {}", self.title)?;

        if !self.authors.is_empty() {
            write!(f, "\nAuthors: {}", self.authors.join(", "))?;
        }
        if let Some(year) = self.first_publish_year {
            write!(f, "\nFirst Publish Year: {year}")?;
        }
        if let Some(date) = self.publish_date.as_deref().filter(|d| !d.is_empty()) {
            write!(f, "\nPublish Date: {date}")?;
        }
        if !self.publishers.is_empty() {
            write!(f, "\nPublishers: {}", self.publishers.join(", "))?;
        }
        if !self.isbns.is_empty() {
            write!(f, "\nISBNs: {}", truncated(&self.isbns, MAX_ISBNS))?;
        }
        if let Some(url) = self.openlibrary_url.as_deref().filter(|u| !u.is_empty()) {
            write!(f, "\nOpen Library: {url}")?;
        }
        if !self.subjects.is_empty() {
            write!(f, "\nSubjects: {}", truncated(&self.subjects, MAX_SUBJECTS))?;
        }

        if !self.cover_urls.is_empty() {
            f.write_str("\nCover URLs:")?;
            for size in CoverSize::ALL.iter().rev() {
                if let Some(url) = self.cover_urls.get(size) {
                    write!(f, "\n  {}: {url}", size.letter())?;
                }
            }
        }

        if let Some(url) = self.amazon_urls.get(&LinkKind::Product) {
            write!(f, "\nAmazon Product: {url}")?;
        }
        if let Some(url) = self.amazon_urls.get(&LinkKind::Search) {
            write!(f, "\nAmazon Search:  {url}")?;
        }

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            write!(f, "\n\nDescription:\n{description}")?;
        }

        Ok(())
    }
}

fn truncated(items: &[String], max: usize) -> String {
    let shown = items[..items.len().min(max)].join(", ");
    if items.len() > max {
        shown + "..."
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{CoverSize, LinkKind, Record};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn title_only() {
        assert_eq!("Title: ", Record::default().to_string());
    }

    #[test]
    fn full_record() {
        let mut record = Record {
            title: "Dune".to_owned(),
            authors: strings(&["Frank Herbert"]),
            first_publish_year: Some(1965),
            publishers: strings(&["Ace Books", "Chilton"]),
            publish_date: Some("August 2005".to_owned()),
            isbns: strings(&["0441013597"]),
            openlibrary_url: Some("https://openlibrary.org/works/OL893415W".to_owned()),
            description: Some("Arrakis.".to_owned()),
            subjects: strings(&["Science fiction"]),
            ..Record::default()
        };
        record
            .cover_urls
            .insert(CoverSize::Small, "https://c/1-S.jpg".to_owned());
        record
            .cover_urls
            .insert(CoverSize::Large, "https://c/1-L.jpg".to_owned());
        record
            .amazon_urls
            .insert(LinkKind::Product, "https://a/dp/0441013597".to_owned());
        record
            .amazon_urls
            .insert(LinkKind::Search, "https://a/s?k=Dune".to_owned());

        let expected = "\
Title: Dune
Authors: Frank Herbert
First Publish Year: 1965
Publish Date: August 2005
Publishers: Ace Books, Chilton
ISBNs: 0441013597
Open Library: https://openlibrary.org/works/OL893415W
Subjects: Science fiction
Cover URLs:
  L: https://c/1-L.jpg
  S: https://c/1-S.jpg
Amazon Product: https://a/dp/0441013597
Amazon Search:  https://a/s?k=Dune

Description:
Arrakis.";

        assert_eq!(expected, record.to_string());
    }

    #[test]
    fn long_lists_are_truncated() {
        let record = Record {
            title: "Many".to_owned(),
            isbns: strings(&["1", "2", "3", "4", "5", "6"]),
            subjects: strings(&["a", "b", "c", "d", "e", "f", "g", "h"]),
            ..Record::default()
        };

        assert_eq!(
            "Title: Many\nISBNs: 1, 2, 3, 4, 5...\nSubjects: a, b, c, d, e, f, g, h",
            record.to_string()
        );
    }

    #[test]
    fn search_link_without_product_link() {
        let mut record = Record::default();
        record
            .amazon_urls
            .insert(LinkKind::Search, "https://a/s?k=".to_owned());

        assert_eq!("Title: \nAmazon Search:  https://a/s?k=", record.to_string());
    }
}
