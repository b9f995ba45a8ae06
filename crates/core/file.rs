use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{eyre, Context, Result};
use log::trace;

/// Reads the titles of a batch file, one per line.
///
/// Lines are trimmed and blank lines or lines starting with `#` are skipped.
pub fn load_titles(path: &Path) -> Result<Vec<String>> {
    trace!("Reading titles from {}", path.display());
    fs::read_to_string(path)
        .wrap_err_with(|| eyre!("Failed to read input file '{}'", path.display()))
        .map(|content| parse_titles(&content))
}

fn parse_titles(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Creates `dir` and its parents when missing and returns its absolute path.
pub fn prepare_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .and_then(|()| fs::canonicalize(dir))
        .wrap_err_with(|| eyre!("Failed to create directory '{}'", dir.display()))
}

/// Writes `contents` to `path`, creating missing parent directories, and returns the absolute
/// path of the written file.
pub fn write_output(path: &Path, contents: &str) -> Result<PathBuf> {
    trace!("Writing output to {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| eyre!("Failed to create directory '{}'", parent.display()))?;
    }

    fs::write(path, contents)
        .wrap_err_with(|| eyre!("Failed to write output file '{}'", path.display()))?;

    Ok(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}
