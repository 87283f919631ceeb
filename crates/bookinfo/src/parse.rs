//! Parsing of ISBN input into [`Row`]s.
//!
//! Every line of input is one [`Row`]. A line holds one or more identifiers separated by commas,
//! each identifier is trimmed but otherwise left untouched - no ISBN validation takes place and
//! malformed identifiers are sent to the API as they are.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::trace;

use crate::{Error, ErrorKind};

/// The identifiers found on a single line of input, in the order they appear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row(Vec<String>);

impl Row {
    /// Creates a [`Row`] from already split identifiers.
    #[must_use]
    pub const fn new(identifiers: Vec<String>) -> Self {
        Self(identifiers)
    }

    /// The identifiers of this row.
    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.0
    }

    /// The identifiers joined by commas, used to query every identifier of the row in one request.
    #[must_use]
    pub fn batch_key(&self) -> String {
        self.0.join(",")
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Parses a single line, [`None`] for lines that are blank once trimmed.
fn parse_line(line: &str) -> Option<Row> {
    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.split(',').map(str::trim).collect())
    }
}

/// Parses already loaded text into [`Row`]s.
///
/// Both `\n` and `\r\n` line endings are accepted.
#[must_use]
pub fn parse_rows(text: &str) -> Vec<Row> {
    text.lines().filter_map(parse_line).collect()
}

/// Reads [`Row`]s line by line from `reader`.
///
/// # Errors
///
/// An [`Err`] is returned when a line cannot be read, such as on invalid UTF-8.
pub fn read_rows<R: BufRead>(reader: R) -> Result<Vec<Row>, Error> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| Error::wrap(ErrorKind::IO, e))?;
        rows.extend(parse_line(&line));
    }
    Ok(rows)
}

/// Opens the file at `path` and reads its [`Row`]s.
///
/// # Errors
///
/// An [`Err`] is returned when the file cannot be opened or read.
pub fn read_rows_from_path(path: &Path) -> Result<Vec<Row>, Error> {
    trace!("Reading ISBN rows from '{}'", path.display());
    let file = File::open(path).map_err(|e| {
        Error::wrap(ErrorKind::IO, e).with_message(format!("Cannot open '{}'", path.display()))
    })?;
    read_rows(BufReader::new(file))
}
