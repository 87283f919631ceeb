//! CSV output of [`BookRecord`]s.

use std::{fs::File, io, path::Path};

use log::trace;

use crate::{BookRecord, Error, ErrorKind};

/// Column names of the CSV output, in order.
pub const HEADER: [&str; 8] = [
    "Row Number",
    "Data Retrieval Type",
    "ISBN",
    "Title",
    "Subtitle",
    "Author Name(s)",
    "Number of Pages",
    "Publish Date",
];

const NOT_AVAILABLE: &str = "N/A";

const fn or_not_available(value: &str) -> &str {
    if value.is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

fn to_fields(record: &BookRecord) -> [String; 8] {
    let pages = if record.number_of_pages == 0 {
        NOT_AVAILABLE.to_owned()
    } else {
        record.number_of_pages.to_string()
    };

    [
        record.row_number.to_string(),
        record.retrieval_type.to_string(),
        record.isbn.clone(),
        or_not_available(record.title.as_deref().unwrap_or_default()).to_owned(),
        or_not_available(&record.subtitle).to_owned(),
        record.author_names.clone(),
        pages,
        or_not_available(&record.publish_date).to_owned(),
    ]
}

/// Writes the [`HEADER`] and one line per record to `writer`.
///
/// Fields containing commas, quotes or line breaks are quoted.
///
/// # Errors
///
/// An [`Err`] is returned when writing to `writer` fails.
pub fn write_records<W: io::Write>(records: &[BookRecord], writer: W) -> Result<(), Error> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(HEADER)
        .map_err(|e| Error::wrap(ErrorKind::Serialize, e))?;
    for record in records {
        csv.write_record(to_fields(record))
            .map_err(|e| Error::wrap(ErrorKind::Serialize, e))?;
    }

    csv.flush().map_err(|e| Error::wrap(ErrorKind::IO, e))
}

/// Creates (or truncates) the file at `path` and writes the records to it.
///
/// # Errors
///
/// An [`Err`] is returned when the file cannot be created or written.
pub fn write_records_to_path(records: &[BookRecord], path: &Path) -> Result<(), Error> {
    trace!("Writing {} record(s) to '{}'", records.len(), path.display());
    let file = File::create(path).map_err(|e| {
        Error::wrap(ErrorKind::IO, e).with_message(format!("Cannot create '{}'", path.display()))
    })?;
    write_records(records, file)
}
