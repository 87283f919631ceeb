#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{fs, path::PathBuf, process, time::Duration};

mod interact;

use bookinfo::{
    api::{http_client, open_library::OPEN_LIBRARY_URL},
    pipeline::{self, Source, Summary},
    Config, DEFAULT_TIMEOUT,
};

use clap::Parser;
use eyre::{eyre, Context};
use log::trace;

const DEFAULT_INPUT: &str = "input.txt";
const DEFAULT_OUTPUT: &str = "output.csv";
const INTERACTIVE_OUTPUT: &str = "book_info.csv";

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:?}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        input,
        output,
        interact,
        api_url,
        timeout,
        verbosity,
        quiet,
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let config = Config {
        api_url: api_url.unwrap_or_else(|| OPEN_LIBRARY_URL.to_owned()),
        timeout: (timeout > 0).then_some(Duration::from_secs(timeout)),
    };
    trace!("Using {config:?}");

    let client = http_client(&config)?;

    if interact {
        trace!("Interact mode enabled");
        let input = if let Some(input) = input {
            input
        } else if let Some(input) = interact::select_input_file()? {
            input
        } else {
            println!("No file selected");
            return Ok(());
        };

        let text = fs::read_to_string(&input)
            .wrap_err_with(|| eyre!("Cannot read the '{}' file", input.display()))?;
        let output = output.unwrap_or_else(|| PathBuf::from(INTERACTIVE_OUTPUT));

        pipeline::run(
            &client,
            &config,
            &Source::Text(text),
            &output,
            &interact::show_completion,
        )
        .wrap_err("Failed to save book information")?;
    } else {
        let input = input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let notify = |summary: &Summary| {
            if !quiet {
                print_summary(summary);
            }
        };

        pipeline::run(&client, &config, &Source::Path(input), &output, &notify)
            .wrap_err("Failed to save book information")?;
    }

    Ok(())
}

fn print_summary(summary: &Summary) {
    if !summary.skipped.is_empty() {
        println!(
            "{} of {} row(s) could not be fetched",
            summary.skipped.len(),
            summary.rows
        );
    }
    println!(
        "Book information retrieved and saved to {}",
        summary.output.display()
    );
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new()
        .verbosity(verbosity)
        .init()
        .wrap_err("Cannot initialise logging")
}

#[derive(Parser)]
#[clap(name = "bookinfo")]
#[clap(about = "Look up book information for rows of ISBNs and save it as a CSV file")]
#[clap(version, author)]
struct Cli {
    /// The text file of ISBNs, one row of comma separated ISBNs per line [default: input.txt]
    #[clap(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// The CSV file to write [default: output.csv, or book_info.csv with --interact]
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Choose the ISBN file from a list instead of using the default input.
    #[clap(long)]
    interact: bool,

    /// Endpoint of the Open Library books API [default: https://openlibrary.org/api/books]
    #[clap(long)]
    api_url: Option<String>,

    /// Seconds to wait for each API request, 0 waits forever
    #[clap(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, conflicts_with = "interact")]
    quiet: bool,
}

#[test]
fn timeout_defaults_to_library_timeout() {
    let cli = Cli::parse_from(["bookinfo"]);
    assert_eq!(DEFAULT_TIMEOUT.as_secs(), cli.timeout);
    assert!(cli.output.is_none());

    let cli = Cli::parse_from(["bookinfo", "--timeout", "0"]);
    assert_eq!(0, cli.timeout);
}
