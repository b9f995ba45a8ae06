use std::path::{Path, PathBuf};

use bookfetch::{Candidate, CoverSize, FetchOptions, Query, Record, SEARCH_LIMIT};
use clap::ArgEnum;
use eyre::{eyre, Context};
use log::{debug, trace, warn};

use crate::{
    file::{load_titles, prepare_dir, write_output},
    interact::user_select_candidate,
};

const SEPARATOR_LEN: usize = 40;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ArgEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Whether anything was found, decides the exit code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
}

impl Outcome {
    pub fn of(records: &[Record]) -> Self {
        if records.is_empty() {
            Self::NotFound
        } else {
            Self::Found
        }
    }

    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Found => 0,
            Self::NotFound => 1,
        }
    }
}

pub struct Output {
    pub format: OutputFormat,
    pub file: Option<PathBuf>,
}

pub struct Batch {
    pub input_file: PathBuf,
    pub covers_dir: Option<PathBuf>,
    pub cover_size: CoverSize,
}

pub struct Single {
    pub show_candidates: usize,
    pub download_cover: Option<PathBuf>,
    pub cover_size: CoverSize,
    pub interact: bool,
}

/// Looks up every title of the input file, a failing title never stops the batch.
pub fn run_batch(
    batch: &Batch,
    author: Option<&str>,
    year: Option<i32>,
    options: &FetchOptions,
    output: &Output,
) -> eyre::Result<Outcome> {
    let titles = load_titles(&batch.input_file)?;
    if titles.is_empty() {
        println!("No titles found in input file.");
        return Ok(Outcome::NotFound);
    }
    trace!("Loaded {} titles", titles.len());

    let covers_dir = batch
        .covers_dir
        .as_deref()
        .map(prepare_dir)
        .transpose()?;

    let mut covers_saved = 0_usize;

    let records = lookup_titles(
        titles,
        author,
        year,
        |query| bookfetch::fetch_book_info(query, options),
        |record| {
            if output.format == OutputFormat::Text && output.file.is_none() {
                println!("{record}");
                println!("{}", separator());
            }

            if let Some(dir) = &covers_dir {
                if let Some(url) = record.cover_urls.get(&batch.cover_size) {
                    let path = dir.join(bookfetch::cover_filename(record, batch.cover_size));
                    match bookfetch::download_cover(url, &path) {
                        Ok(()) => covers_saved += 1,
                        Err(err) => debug!("Skipping cover for '{}': {err}", record.title),
                    }
                }
            }
        },
    );

    match (&output.file, output.format) {
        (Some(path), OutputFormat::Json) => {
            let saved = write_output(path, &serde_json::to_string_pretty(&records)?)?;
            println!("Saved results to: {}", saved.display());
        }
        (Some(path), OutputFormat::Text) => {
            let blocks: String = records.iter().map(text_block).collect();
            let saved = write_output(path, &blocks)?;
            println!("Saved results to: {}", saved.display());
        }
        (None, OutputFormat::Json) => println!("{}", serde_json::to_string_pretty(&records)?),
        (None, OutputFormat::Text) => {}
    }

    if let Some(dir) = &covers_dir {
        println!(
            "Saved cover images: {covers_saved} file(s) to {}",
            dir.display()
        );
    }

    Ok(Outcome::of(&records))
}

/// Runs `lookup` for every title and collects what was found, calling `found` on each record as
/// it arrives. Titles that are not found or fail are reported and skipped.
fn lookup_titles<F, G>(
    titles: Vec<String>,
    author: Option<&str>,
    year: Option<i32>,
    mut lookup: F,
    mut found: G,
) -> Vec<Record>
where
    F: FnMut(&Query) -> Result<Option<Record>, bookfetch::Error>,
    G: FnMut(&Record),
{
    let mut records = Vec::new();

    for title in titles {
        let query = Query {
            title,
            author: author.map(str::to_owned),
            year,
        };

        match lookup(&query) {
            Ok(Some(record)) => {
                found(&record);
                records.push(record);
            }
            Ok(None) => println!("No book found: {}", query.title),
            Err(err) => warn!("Error for '{}': {err}", query.title),
        }
    }

    records
}

/// Lists candidates, or looks up a single book and optionally downloads its cover.
pub fn run_single(
    single: &Single,
    query: &Query,
    options: &FetchOptions,
    output: &Output,
) -> eyre::Result<Outcome> {
    if single.show_candidates > 0 {
        return show_candidates(query, single.show_candidates);
    }

    let mut options = options.clone();
    if single.interact {
        match select_candidate(query, options.pick_index)? {
            Some(index) => options.pick_index = index,
            None => {
                println!("No book found.");
                return Ok(Outcome::NotFound);
            }
        }
    }

    let record = match bookfetch::fetch_book_info(query, &options)
        .wrap_err_with(|| eyre!("Fetch error for '{}'", query.title))?
    {
        Some(record) => record,
        None => {
            println!("No book found.");
            return Ok(Outcome::NotFound);
        }
    };

    let rendered = match output.format {
        OutputFormat::Json => serde_json::to_string_pretty(&record)?,
        OutputFormat::Text => record.to_string(),
    };

    if let Some(path) = &output.file {
        let saved = write_output(path, &(rendered + "\n"))?;
        println!("Saved result to: {}", saved.display());
    } else {
        println!("{rendered}");
    }

    if let Some(path) = &single.download_cover {
        download_single_cover(&record, single.cover_size, path);
    }

    Ok(Outcome::Found)
}

fn show_candidates(query: &Query, count: usize) -> eyre::Result<Outcome> {
    let candidates = bookfetch::search_candidates(query, SEARCH_LIMIT.max(count))
        .wrap_err("Search error")?;

    if candidates.is_empty() {
        println!("No candidates found.");
        return Ok(Outcome::NotFound);
    }

    println!("Top {} candidates:", count.min(candidates.len()));
    for candidate in candidates.iter().take(count) {
        println!("{}", candidate_line(candidate));
    }

    Ok(Outcome::Found)
}

fn select_candidate(query: &Query, pick_index: usize) -> eyre::Result<Option<usize>> {
    let limit = SEARCH_LIMIT.max(pick_index.saturating_add(1));
    let candidates = bookfetch::search_candidates(query, limit).wrap_err("Search error")?;

    if candidates.is_empty() {
        return Ok(None);
    }

    user_select_candidate(&candidates).map(Some)
}

fn download_single_cover(record: &Record, size: CoverSize, path: &Path) {
    match record.cover_urls.get(&size) {
        None => warn!("No cover image available to download."),
        Some(url) => match bookfetch::download_cover(url, path) {
            Ok(()) => println!("Saved cover image: {}", path.display()),
            Err(err) => warn!("Failed to download cover: {err}"),
        },
    }
}

/// `[index] title by A, B (year)`, leaving out what is unknown.
pub fn candidate_line(candidate: &Candidate) -> String {
    let mut line = format!("[{}] {}", candidate.index, candidate.title);
    if !candidate.author_names.is_empty() {
        line.push_str(" by ");
        line.push_str(&candidate.author_names.join(", "));
    }
    if let Some(year) = candidate.first_publish_year {
        line.push_str(&format!(" ({year})"));
    }
    line
}

fn separator() -> String {
    "-".repeat(SEPARATOR_LEN)
}

fn text_block(record: &Record) -> String {
    format!("{record}\n{}\n", separator())
}
