#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

//! # bookinfo
//!
//! bookinfo reads rows of ISBNs, looks every row up in the Open Library books API and writes the
//! book information found to a CSV file. See [`pipeline::run`] for the complete read → fetch →
//! write flow, or use [`parse`], [`fetch`] and [`writer`] on their own.

use std::time::Duration;

pub mod api;
mod error;
pub mod fetch;
pub mod parse;
pub mod pipeline;
mod record;
pub mod writer;

pub use error::{Error, ErrorKind};
pub use record::{BookRecord, RetrievalType};

/// Default time allowed for a single API request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for talking to the book metadata API.
#[derive(Clone, Debug)]
pub struct Config {
    /// Endpoint of the books API, the batch query is appended to it.
    pub api_url: String,
    /// Time allowed for a single request, [`None`] waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: api::open_library::OPEN_LIBRARY_URL.to_owned(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}
