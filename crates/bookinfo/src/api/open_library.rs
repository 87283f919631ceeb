//! The Open Library books API (`/api/books`) with `jscmd=data` output.

use std::collections::HashMap;

use log::{info, trace};
use serde::Deserialize;

use super::Client;
use crate::Error;

/// Default endpoint of the Open Library books API.
pub const OPEN_LIBRARY_URL: &str = "https://openlibrary.org/api/books";

/// A decoded API response: book data keyed by the identifiers that were requested.
///
/// Identifiers the API knows nothing about are absent from the map.
pub type Payload = HashMap<String, BookData>;

/// The book fields used from a single API entry.
///
/// Every field is optional, unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct BookData {
    /// Main title of the book.
    #[serde(default)]
    pub title: Option<String>,
    /// Subtitle, often absent.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Authors in the order given by the API.
    #[serde(default)]
    pub authors: Option<Vec<Author>>,
    /// Page count of this edition.
    #[serde(default)]
    pub number_of_pages: Option<u32>,
    /// Free-form publish date such as `1988` or `May 1996`.
    #[serde(default)]
    pub publish_date: Option<String>,
}

/// An author entry, only the display name is used.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Author {
    /// Display name of the author.
    #[serde(default)]
    pub name: Option<String>,
}

impl BookData {
    /// Names of every author that has one, joined by `"; "`.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .flatten()
            .filter_map(|a| a.name.as_deref())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// The request URL for `batch_key` against the API at `api_url`.
#[must_use]
pub fn books_url(api_url: &str, batch_key: &str) -> String {
    format!("{api_url}?bibkeys={batch_key}&format=json&jscmd=data")
}

pub(crate) fn get_books<C: Client>(
    client: &C,
    api_url: &str,
    batch_key: &str,
) -> Result<Payload, Error> {
    info!("Searching for ISBN(s) '{batch_key}' using Open Library API");
    let url = books_url(api_url, batch_key);
    let payload: Payload = client.get_json(&url)?;
    trace!("Request was successful - {} entries returned", payload.len());
    Ok(payload)
}
