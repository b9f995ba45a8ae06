#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{env, error, path::PathBuf, process};

mod app;
mod file;
mod interact;

use app::{Batch, Outcome, Output, OutputFormat, Single};

use bookfetch::{AmazonDomain, CoverSize, FetchOptions, Query};

use clap::{ArgEnum, Args, Parser};
use eyre::eyre;
use log::{error, trace};

const STANDARD_INPUT_FILE: &str = "titles.txt";
const STANDARD_OUTPUT_FILE: &str = "results.json";
const STANDARD_COVERS_DIR: &str = "covers";

fn main() {
    match try_main() {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(err) => {
            error!("{:#}", err);
            process::exit(2);
        }
    }
}

fn try_main() -> eyre::Result<Outcome> {
    let no_cli_args = env::args_os().len() <= 1;
    let mut cli = Cli::parse();

    setup_errlog(cli.global_opts.verbosity as usize, cli.global_opts.quiet)
        .map_err(|e| eyre!("Cannot set up logging: {e}"))?;

    if cli.preset == Some(Preset::Standard)
        || (no_cli_args && PathBuf::from(STANDARD_INPUT_FILE).exists())
    {
        trace!("Applying the standard preset");
        cli.apply_standard_preset(PathBuf::from(STANDARD_INPUT_FILE).exists());
    }

    cli.validate()?;

    let Cli {
        title,
        author,
        year,
        show_candidates,
        pick_index,
        format,
        download_cover,
        cover_size,
        input_file,
        use_google,
        google_api_key,
        amazon_domain,
        output_file,
        covers_dir,
        global_opts,
        ..
    } = cli;

    let options = FetchOptions {
        pick_index,
        use_google,
        google_api_key,
        amazon_domain,
    };
    let output = Output {
        format,
        file: output_file,
    };

    if let Some(input_file) = input_file {
        let batch = Batch {
            input_file,
            covers_dir,
            cover_size,
        };
        return app::run_batch(&batch, author.as_deref(), year, &options, &output);
    }

    // `validate` guarantees a title when there is no input file
    let title = title.unwrap_or_default();
    let single = Single {
        show_candidates,
        download_cover,
        cover_size,
        interact: global_opts.interactive(),
    };

    app::run_single(&single, &Query { title, author, year }, &options, &output)
}

fn setup_errlog(verbosity: usize, quiet: bool) -> Result<(), Box<dyn error::Error>> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 1 } else { verbosity + 2 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "bookfetch")]
#[clap(
    about = "Fetch book info, cover image URLs and a summary by title using Open Library (and optionally Google Books)"
)]
#[clap(version, author)]
struct Cli {
    /// Book title to search (exact or partial)
    title: Option<String>,

    /// Filter by author name
    #[clap(long)]
    author: Option<String>,

    /// Filter by first publish year
    #[clap(long)]
    year: Option<i32>,

    /// Show the top N candidates and exit
    #[clap(long, value_name = "N", default_value = "0")]
    show_candidates: usize,

    /// Index of the candidate to use, out of range indexes use the first candidate
    #[clap(long, value_name = "INDEX", default_value = "0")]
    pick_index: usize,

    /// Output format
    #[clap(long, arg_enum, default_value = "text")]
    format: OutputFormat,

    /// Download the cover image to PATH (uses --cover-size)
    #[clap(long, value_name = "PATH", parse(from_os_str))]
    download_cover: Option<PathBuf>,

    /// Cover image size when downloading
    #[clap(long, value_name = "SIZE", default_value = "l", possible_values = ["s", "m", "l"])]
    cover_size: CoverSize,

    /// Read titles from a file, one per line (blank lines and lines starting with # are ignored)
    #[clap(long, value_name = "PATH", parse(from_os_str))]
    input_file: Option<PathBuf>,

    /// Fill missing fields from Google Books
    #[clap(long)]
    use_google: bool,

    /// Google Books API key
    #[clap(long, value_name = "KEY", env = "GOOGLE_BOOKS_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,

    /// Amazon domain used for retailer links
    #[clap(long, value_name = "DOMAIN", default_value = "co.jp", possible_values = AmazonDomain::CODES)]
    amazon_domain: AmazonDomain,

    /// Write results to PATH instead of stdout
    #[clap(long, value_name = "PATH", parse(from_os_str))]
    output_file: Option<PathBuf>,

    /// Download the cover image of each entry to DIR (batch mode only)
    #[clap(long, value_name = "DIR", parse(from_os_str))]
    covers_dir: Option<PathBuf>,

    /// Use preset options, 'standard' equals: --use-google --format json --input-file titles.txt
    /// --output-file results.json --covers-dir covers --cover-size l
    #[clap(long, arg_enum)]
    preset: Option<Preset>,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Choose the candidate from a selection prompt instead of using --pick-index, ignored
    /// with --quiet.
    #[clap(short, long)]
    interact: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Only errors and warnings are logged to stderr.
    #[clap(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ArgEnum)]
enum Preset {
    Standard,
}

impl GlobalOpts {
    /// Prompting is only possible when asked for and not silenced by `--quiet`.
    const fn interactive(&self) -> bool {
        self.interact && !self.quiet
    }
}

impl Cli {
    fn apply_standard_preset(&mut self, input_file_exists: bool) {
        if self.input_file.is_none() && input_file_exists {
            self.input_file = Some(PathBuf::from(STANDARD_INPUT_FILE));
        }
        self.use_google = true;
        self.format = OutputFormat::Json;
        if self.output_file.is_none() {
            self.output_file = Some(PathBuf::from(STANDARD_OUTPUT_FILE));
        }
        if self.covers_dir.is_none() {
            self.covers_dir = Some(PathBuf::from(STANDARD_COVERS_DIR));
        }
    }

    fn validate(&self) -> eyre::Result<()> {
        let batch = self.input_file.is_some();

        if self.title.is_none() && !batch {
            return Err(eyre!(
                "Provide a title or --input-file (or use --preset standard)"
            ));
        }
        if batch && self.show_candidates > 0 {
            return Err(eyre!(
                "--show-candidates is not supported with --input-file."
            ));
        }
        if batch && self.download_cover.is_some() {
            return Err(eyre!("--download-cover is not supported with --input-file."));
        }
        if self.covers_dir.is_some() && !batch {
            return Err(eyre!(
                "--covers-dir is only supported with --input-file (batch mode)."
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bookfetch").chain(args.iter().copied()))
            .expect("arguments should be valid")
    }

    #[test]
    fn defaults() {
        let cli = parse(&["Dune"]);

        assert_eq!(Some("Dune"), cli.title.as_deref());
        assert_eq!(0, cli.pick_index);
        assert_eq!(OutputFormat::Text, cli.format);
        assert_eq!(CoverSize::Large, cli.cover_size);
        assert_eq!(AmazonDomain::CoJp, cli.amazon_domain);
        assert!(!cli.use_google);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn quiet_alone_is_not_interactive() {
        assert!(!parse(&["Dune", "-q"]).global_opts.interactive());
        assert!(parse(&["Dune", "-i"]).global_opts.interactive());
        assert!(!parse(&["Dune", "-i", "-q"]).global_opts.interactive());
        assert!(!parse(&["Dune"]).global_opts.interactive());
    }

    #[test]
    fn cover_size_accepts_only_lowercase_tags() {
        assert_eq!(CoverSize::Small, parse(&["Dune", "--cover-size", "s"]).cover_size);
        assert!(Cli::try_parse_from(["bookfetch", "Dune", "--cover-size", "xl"]).is_err());
    }

    #[test]
    fn unknown_amazon_domain_is_rejected() {
        let res = Cli::try_parse_from(["bookfetch", "Dune", "--amazon-domain", "nope"]);
        assert!(res.is_err());

        let cli = parse(&["Dune", "--amazon-domain", "com.au"]);
        assert_eq!(AmazonDomain::ComAu, cli.amazon_domain);
    }

    #[test]
    fn standard_preset_keeps_explicit_values() {
        let mut cli = parse(&["--preset", "standard", "--output-file", "out/mine.json"]);
        cli.apply_standard_preset(true);

        assert_eq!(Some(PathBuf::from("titles.txt")), cli.input_file);
        assert_eq!(Some(PathBuf::from("out/mine.json")), cli.output_file);
        assert_eq!(Some(PathBuf::from("covers")), cli.covers_dir);
        assert_eq!(OutputFormat::Json, cli.format);
        assert!(cli.use_google);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn standard_preset_without_titles_file_needs_a_title() {
        let mut cli = parse(&["--preset", "standard"]);
        cli.apply_standard_preset(false);

        assert_eq!(None, cli.input_file);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn validation_rejects_mode_mismatches() {
        assert!(parse(&[]).validate().is_err());
        assert!(parse(&["--input-file", "t.txt", "--show-candidates", "3"])
            .validate()
            .is_err());
        assert!(parse(&["--input-file", "t.txt", "--download-cover", "c.jpg"])
            .validate()
            .is_err());
        assert!(parse(&["Dune", "--covers-dir", "covers"]).validate().is_err());
        assert!(parse(&["--input-file", "t.txt", "--covers-dir", "covers"])
            .validate()
            .is_ok());
    }
}
