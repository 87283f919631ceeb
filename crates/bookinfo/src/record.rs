use std::fmt;

use crate::api::open_library::BookData;

/// Where the data of a [`BookRecord`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RetrievalType {
    /// Resolved from a response fetched for the record's row.
    Server,
    /// Resolved from a response fetched for an earlier row of the same run.
    Cache,
}

impl fmt::Display for RetrievalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => f.write_str("Server"),
            Self::Cache => f.write_str("Cache"),
        }
    }
}

/// The book information found for one identifier of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookRecord {
    /// 1-based number of the input row the identifier was read from.
    pub row_number: usize,
    /// Whether the data was fetched for this row or taken from the cache.
    pub retrieval_type: RetrievalType,
    /// The identifier exactly as it was read.
    pub isbn: String,
    /// [`None`] when the API has no title for the book.
    pub title: Option<String>,
    /// Empty when unknown.
    pub subtitle: String,
    /// Author display names joined by `"; "`, empty when there are none.
    pub author_names: String,
    /// `0` when unknown.
    pub number_of_pages: u32,
    /// Publish date as given by the API, empty when unknown.
    pub publish_date: String,
}

impl BookRecord {
    pub(crate) fn resolve(
        row_number: usize,
        retrieval_type: RetrievalType,
        isbn: &str,
        data: &BookData,
    ) -> Self {
        Self {
            row_number,
            retrieval_type,
            isbn: isbn.to_owned(),
            title: data.title.clone(),
            subtitle: data.subtitle.clone().unwrap_or_default(),
            author_names: data.author_names(),
            number_of_pages: data.number_of_pages.unwrap_or_default(),
            publish_date: data.publish_date.clone().unwrap_or_default(),
        }
    }
}

#[test]
fn retrieval_type_displays_symbolic_name() {
    assert_eq!("Server", RetrievalType::Server.to_string());
    assert_eq!("Cache", RetrievalType::Cache.to_string());
}

#[test]
fn missing_optional_fields_default_to_empty_and_zero() {
    let record = BookRecord::resolve(3, RetrievalType::Server, "123", &BookData::default());

    assert_eq!(3, record.row_number);
    assert_eq!("123", record.isbn);
    assert_eq!(None, record.title);
    assert_eq!("", record.subtitle);
    assert_eq!("", record.author_names);
    assert_eq!(0, record.number_of_pages);
    assert_eq!("", record.publish_date);
}
