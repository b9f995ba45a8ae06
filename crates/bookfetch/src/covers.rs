use std::{fs, path::Path};

use log::trace;

use crate::{
    api::Client,
    normalize::{sanitize_filename, DEFAULT_FILENAME_LEN},
    record::{CoverSize, Record},
    Error, ErrorKind,
};

/// File name for a downloaded cover, e.g. `Dune_OL26242482M_l.jpg`.
///
/// The title is sanitized and suffixed with the most specific identifier known: the edition
/// key, then the last segment of the work key, then the first ISBN.
#[must_use]
pub fn cover_filename(record: &Record, size: CoverSize) -> String {
    let base = sanitize_filename(&record.title, DEFAULT_FILENAME_LEN);

    let suffix = record
        .openlibrary_edition_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .or_else(|| {
            record
                .openlibrary_work_key
                .as_deref()
                .and_then(|key| key.rsplit('/').next())
                .filter(|key| !key.is_empty())
        })
        .or_else(|| record.isbns.first().map(String::as_str))
        .filter(|suffix| !suffix.is_empty());

    match suffix {
        Some(suffix) => format!("{base}_{suffix}_{size}.jpg"),
        None => format!("{base}_{size}.jpg"),
    }
}

/// Downloads the image at `url` to `path`, creating the parent directories as needed.
pub(crate) fn save_cover<C: Client>(client: &C, url: &str, path: &Path) -> Result<(), Error> {
    trace!("Downloading cover '{url}' to {}", path.display());

    let bytes = client.get_bytes(url)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::wrap_with(
                ErrorKind::IO,
                format!("Cannot create directory {}", parent.display()),
                e,
            )
        })?;
    }

    fs::write(path, bytes).map_err(|e| {
        Error::wrap_with(ErrorKind::IO, format!("Cannot write {}", path.display()), e)
    })
}
