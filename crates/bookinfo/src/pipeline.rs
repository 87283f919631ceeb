//! The read → fetch → write pipeline shared by every entry point.

use std::path::{Path, PathBuf};

use log::info;

use crate::{
    api::Client,
    fetch::{fetch_book_records, Cache, SkippedRow},
    parse::{parse_rows, read_rows_from_path, Row},
    writer::write_records_to_path,
    Config, Error,
};

/// Where the ISBN rows are read from.
#[derive(Clone, Debug)]
pub enum Source {
    /// A file read line by line.
    Path(PathBuf),
    /// Text that has already been loaded.
    Text(String),
}

impl Source {
    fn rows(&self) -> Result<Vec<Row>, Error> {
        match self {
            Self::Path(path) => read_rows_from_path(path),
            Self::Text(text) => Ok(parse_rows(text)),
        }
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct Summary {
    /// Number of input rows read.
    pub rows: usize,
    /// Number of records written to the output.
    pub records: usize,
    /// Rows that produced no records because their request failed.
    pub skipped: Vec<SkippedRow>,
    /// The CSV file written.
    pub output: PathBuf,
}

/// Receives the [`Summary`] once a run has completed.
pub trait Notifier {
    /// Called after the output has been written.
    fn notify(&self, summary: &Summary);
}

impl<F> Notifier for F
where
    F: Fn(&Summary),
{
    fn notify(&self, summary: &Summary) {
        self(summary);
    }
}

/// Reads the rows of `source`, fetches their book information and writes it as CSV to `output`,
/// then hands the [`Summary`] to `notifier`.
///
/// The [`Cache`] lives for the duration of this call only.
///
/// # Errors
///
/// An [`Err`] is returned when the source cannot be read or the output cannot be written, in
/// which case `notifier` is not called. Failed API requests do not fail the run, see
/// [`fetch_book_records`].
pub fn run<C: Client>(
    client: &C,
    config: &Config,
    source: &Source,
    output: &Path,
    notifier: &dyn Notifier,
) -> Result<Summary, Error> {
    let rows = source.rows()?;
    info!("Read {} row(s) of ISBNs", rows.len());

    let report = {
        let mut cache = Cache::new();
        fetch_book_records(client, &config.api_url, &rows, &mut cache)
    };

    write_records_to_path(&report.records, output)?;
    info!("Wrote {} record(s) to '{}'", report.records.len(), output.display());

    let summary = Summary {
        rows: rows.len(),
        records: report.records.len(),
        skipped: report.skipped,
        output: output.to_owned(),
    };
    notifier.notify(&summary);
    Ok(summary)
}
