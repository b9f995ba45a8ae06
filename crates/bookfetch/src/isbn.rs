//! ISBN helpers.

/// Converts an ISBN-13 in the `978` prefix range to its ISBN-10 form.
///
/// Any non digit characters, such as hyphens, are ignored. [`None`] is returned when the input
/// does not hold exactly 13 digits or does not start with `978`, as only that range has an
/// ISBN-10 equivalent.
///
/// # Examples
///
/// ```
/// assert_eq!(Some("0306406152".to_owned()), bookfetch::isbn13_to_isbn10("978-0-306-40615-7"));
/// assert_eq!(None, bookfetch::isbn13_to_isbn10("9791234567896"));
/// ```
#[must_use]
pub fn isbn13_to_isbn10(isbn13: &str) -> Option<String> {
    let digits: Vec<u32> = isbn13.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 13 || digits[..3] != [9, 7, 8] {
        return None;
    }

    let core = &digits[3..12];
    let sum: u32 = core
        .iter()
        .zip((2..=10).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    let check = (11 - sum % 11) % 11;
    let mut isbn10: String = core
        .iter()
        .filter_map(|&d| char::from_digit(d, 10))
        .collect();
    isbn10.push(if check == 10 {
        'X'
    } else {
        char::from_digit(check, 10)?
    });
    Some(isbn10)
}

/// Removes hyphens from an identifier, e.g. `978-0-306-40615-7`.
pub(crate) fn strip_hyphens(isbn: &str) -> String {
    isbn.replace('-', "")
}

/// Number of characters once hyphens are removed.
pub(crate) fn unhyphenated_len(isbn: &str) -> usize {
    isbn.chars().filter(|&c| c != '-').count()
}

#[cfg(test)]
mod tests {
    use super::isbn13_to_isbn10;

    fn isbn13_check_digit(first_twelve: &str) -> char {
        let sum: u32 = first_twelve
            .chars()
            .filter_map(|c| c.to_digit(10))
            .enumerate()
            .map(|(i, d)| if i % 2 == 0 { d } else { d * 3 })
            .sum();
        char::from_digit((10 - sum % 10) % 10, 10).unwrap()
    }

    #[test]
    fn converts_known_isbn13() {
        assert_eq!(Some("0306406152".to_owned()), isbn13_to_isbn10("9780306406157"));
        assert_eq!(Some("0735619670".to_owned()), isbn13_to_isbn10("9780735619678"));
    }

    #[test]
    fn check_character_can_be_x() {
        // 080442957X is a well known ISBN-10 with an X check character.
        assert_eq!(Some("080442957X".to_owned()), isbn13_to_isbn10("9780804429573"));
    }

    #[test]
    fn hyphens_and_spaces_are_ignored() {
        assert_eq!(
            Some("0306406152".to_owned()),
            isbn13_to_isbn10("978-0 306-40615-7")
        );
    }

    #[test]
    fn non_978_prefix_has_no_isbn10() {
        assert_eq!(None, isbn13_to_isbn10("9791032305690"));
        assert_eq!(None, isbn13_to_isbn10("1234567890123"));
    }

    #[test]
    fn wrong_length_has_no_isbn10() {
        assert_eq!(None, isbn13_to_isbn10("978030640615"));
        assert_eq!(None, isbn13_to_isbn10("97803064061570"));
        assert_eq!(None, isbn13_to_isbn10(""));
    }

    #[test]
    fn reconverting_a_rebuilt_isbn13_yields_the_same_isbn10() {
        for core in ["030640615", "080442957", "043942089", "000000000", "999999999"] {
            let mut isbn13 = format!("978{core}");
            isbn13.push(isbn13_check_digit(&isbn13));

            let isbn10 = isbn13_to_isbn10(&isbn13).unwrap();
            assert!(isbn10.starts_with(core), "{isbn10} should keep the core {core}");

            let mut rebuilt = format!("978{}", &isbn10[..9]);
            rebuilt.push(isbn13_check_digit(&rebuilt));
            assert_eq!(Some(isbn10), isbn13_to_isbn10(&rebuilt));
        }
    }
}
