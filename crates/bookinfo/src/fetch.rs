//! Fetching book information for parsed [`Row`]s.
//!
//! Each row is requested from the API as a single batch. The response of a batch is kept in a
//! [`Cache`] under every identifier it resolved, so that an identifier appearing again in a later
//! row is resolved from that earlier response instead of the new one.

use std::{collections::HashMap, rc::Rc};

use log::{info, trace, warn};

use crate::{
    api::{
        open_library::{self, BookData, Payload},
        Client,
    },
    parse::Row,
    BookRecord, Error, RetrievalType,
};

/// API responses of the current run keyed by the identifiers they resolved.
///
/// A single response is shared by all the identifiers of the batch it was fetched for.
#[derive(Debug, Default)]
pub struct Cache {
    payloads: HashMap<String, Rc<Payload>>,
}

impl Cache {
    /// Creates an empty [`Cache`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a response is held for `isbn`.
    #[must_use]
    pub fn contains(&self, isbn: &str) -> bool {
        self.payloads.contains_key(isbn)
    }

    /// Number of identifiers with a cached response.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Whether no response has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    fn get(&self, isbn: &str) -> Option<&Payload> {
        self.payloads.get(isbn).map(|p| &**p)
    }

    fn insert(&mut self, isbn: String, payload: Rc<Payload>) {
        self.payloads.insert(isbn, payload);
    }
}

/// A row for which no records were produced because its request failed.
#[derive(Debug)]
pub struct SkippedRow {
    /// 1-based number of the skipped row.
    pub row_number: usize,
    /// The batch key that was requested.
    pub batch_key: String,
    /// Why the request failed.
    pub reason: Error,
}

/// The outcome of [`fetch_book_records`].
#[derive(Debug, Default)]
pub struct FetchReport {
    /// One record per identifier of every row that was fetched, in input order.
    pub records: Vec<BookRecord>,
    /// Rows whose request failed, in input order.
    pub skipped: Vec<SkippedRow>,
}

/// Fetches book information for every identifier in `rows` from the API at `api_url`.
///
/// Rows are requested one after another. A row whose request fails for any reason (transport
/// error, non-success status or an unexpected response body) is skipped and reported in
/// [`FetchReport::skipped`], the rows after it are still fetched and keep their row numbers.
#[must_use]
pub fn fetch_book_records<C: Client>(
    client: &C,
    api_url: &str,
    rows: &[Row],
    cache: &mut Cache,
) -> FetchReport {
    let mut report = FetchReport::default();

    for (row_number, row) in (1..).zip(rows) {
        let batch_key = row.batch_key();
        match open_library::get_books(client, api_url, &batch_key) {
            Ok(payload) => resolve_row(row_number, row, payload, cache, &mut report.records),
            Err(reason) => {
                warn!("Skipping row {row_number} ('{batch_key}'): {reason}");
                report.skipped.push(SkippedRow {
                    row_number,
                    batch_key,
                    reason,
                });
            }
        }
    }

    info!(
        "Fetched {} record(s), skipped {} row(s)",
        report.records.len(),
        report.skipped.len()
    );
    report
}

fn resolve_row(
    row_number: usize,
    row: &Row,
    payload: Payload,
    cache: &mut Cache,
    records: &mut Vec<BookRecord>,
) {
    let payload = Rc::new(payload);

    for isbn in row.identifiers() {
        let record = if let Some(cached) = cache.get(isbn) {
            trace!("'{isbn}' found in cache");
            // the cached response is the one that first resolved `isbn`, so it holds an entry
            let data = cached.get(isbn);
            resolve(row_number, RetrievalType::Cache, isbn, data)
        } else if let Some(data) = payload.get(isbn) {
            let record = BookRecord::resolve(row_number, RetrievalType::Server, isbn, data);
            cache.insert(isbn.clone(), Rc::clone(&payload));
            record
        } else {
            warn!("No book information returned for '{isbn}' on row {row_number}");
            resolve(row_number, RetrievalType::Server, isbn, None)
        };

        records.push(record);
    }
}

fn resolve(
    row_number: usize,
    retrieval_type: RetrievalType,
    isbn: &str,
    data: Option<&BookData>,
) -> BookRecord {
    match data {
        Some(data) => BookRecord::resolve(row_number, retrieval_type, isbn, data),
        None => BookRecord::resolve(row_number, retrieval_type, isbn, &BookData::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{open_library::books_url, MockClient},
        parse::parse_rows,
        ErrorKind,
    };

    const API: &str = "http://localhost/api/books";
    const ANIMAL_FARM: &str = include_str!("../tests/data/animal_farm.json");
    const BATCH: &str = include_str!("../tests/data/batch.json");

    fn url(batch_key: &str) -> String {
        books_url(API, batch_key)
    }

    fn fetch(client: &MockClient, input: &str) -> FetchReport {
        fetch_book_records(client, API, &parse_rows(input), &mut Cache::new())
    }

    #[test]
    fn single_identifier_resolved_from_server() {
        let client = MockClient::new().respond(url("0451526538"), ANIMAL_FARM);

        let report = fetch(&client, "0451526538");

        assert!(report.skipped.is_empty());
        assert_eq!(
            vec![BookRecord {
                row_number: 1,
                retrieval_type: RetrievalType::Server,
                isbn: "0451526538".to_owned(),
                title: Some("Animal Farm".to_owned()),
                subtitle: String::new(),
                author_names: "George Orwell".to_owned(),
                number_of_pages: 141,
                publish_date: String::new(),
            }],
            report.records
        );
    }

    #[test]
    fn one_request_per_row_with_batch_key() {
        let client = MockClient::new()
            .respond(url("0140328726,0451526538"), BATCH)
            .respond(url("0451526538"), ANIMAL_FARM);

        let report = fetch(&client, " 0140328726 , 0451526538\n0451526538\n");

        assert_eq!(
            vec![url("0140328726,0451526538"), url("0451526538")],
            client.requested_urls()
        );
        assert_eq!(3, report.records.len());
    }

    #[test]
    fn repeated_identifier_resolved_from_cached_payload() {
        // the second response differs, the cached record must come from the first one
        let client = MockClient::new()
            .respond(url("0140328726,0451526538"), BATCH)
            .respond(url("0451526538"), ANIMAL_FARM);

        let report = fetch(&client, "0140328726,0451526538\n0451526538");
        let records = &report.records;

        assert_eq!(RetrievalType::Server, records[0].retrieval_type);
        assert_eq!(RetrievalType::Server, records[1].retrieval_type);
        assert_eq!(RetrievalType::Cache, records[2].retrieval_type);
        assert_eq!(2, records[2].row_number);
        assert_eq!("1996", records[2].publish_date);
    }

    #[test]
    fn identifier_repeated_within_row_is_cached_after_first() {
        let client = MockClient::new().respond(url("0451526538,0451526538"), ANIMAL_FARM);

        let report = fetch(&client, "0451526538,0451526538");
        let types: Vec<_> = report.records.iter().map(|r| r.retrieval_type).collect();

        assert_eq!(vec![RetrievalType::Server, RetrievalType::Cache], types);
        assert!(report.records.iter().all(|r| r.row_number == 1));
    }

    #[test]
    fn failed_row_is_skipped_and_row_numbers_still_advance() {
        let client = MockClient::new()
            .fail(url("1,2,3"), ErrorKind::Status)
            .respond(url("0451526538"), ANIMAL_FARM);

        let report = fetch(&client, "1,2,3\n0451526538");

        assert_eq!(1, report.records.len());
        assert_eq!(2, report.records[0].row_number);
        assert_eq!(1, report.skipped.len());
        assert_eq!(1, report.skipped[0].row_number);
        assert_eq!("1,2,3", report.skipped[0].batch_key);
        assert_eq!(ErrorKind::Status, report.skipped[0].reason.kind());
    }

    #[test]
    fn transport_and_body_errors_skip_the_row() {
        let client = MockClient::new()
            .fail(url("a"), ErrorKind::IO)
            .respond(url("b"), "<html>not json</html>");

        let report = fetch(&client, "a\nb");

        assert!(report.records.is_empty());
        let kinds: Vec<_> = report.skipped.iter().map(|s| s.reason.kind()).collect();
        assert_eq!(vec![ErrorKind::IO, ErrorKind::Deserialize], kinds);
    }

    #[test]
    fn identifier_missing_from_response_yields_empty_record_and_is_not_cached() {
        let client = MockClient::new().respond(url("0451526538,unknown"), ANIMAL_FARM);
        let mut cache = Cache::new();

        let report = fetch_book_records(
            &client,
            API,
            &parse_rows("0451526538,unknown"),
            &mut cache,
        );

        assert_eq!(2, report.records.len());
        let unknown = &report.records[1];
        assert_eq!("unknown", unknown.isbn);
        assert_eq!(RetrievalType::Server, unknown.retrieval_type);
        assert_eq!(None, unknown.title);
        assert!(cache.contains("0451526538"));
        assert!(!cache.contains("unknown"));
    }

    #[test]
    fn rerun_with_same_cache_only_changes_retrieval_type() {
        let client = MockClient::new()
            .respond(url("0140328726,0451526538"), BATCH)
            .respond(url("0451526538"), BATCH);
        let rows = parse_rows("0140328726,0451526538\n0451526538");
        let mut cache = Cache::new();

        let first = fetch_book_records(&client, API, &rows, &mut cache);
        let second = fetch_book_records(&client, API, &rows, &mut cache);

        assert_eq!(first.records.len(), second.records.len());
        for (a, b) in first.records.iter().zip(&second.records) {
            assert_eq!(RetrievalType::Cache, b.retrieval_type);
            assert_eq!(
                BookRecord {
                    retrieval_type: RetrievalType::Cache,
                    ..a.clone()
                },
                *b
            );
        }
        assert_eq!(2, cache.len());
    }
}
