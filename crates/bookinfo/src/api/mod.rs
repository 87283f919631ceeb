//! HTTP access to the book metadata API.

use log::trace;
use serde::de::DeserializeOwned;

pub mod open_library;

use crate::{Config, Error, ErrorKind};

/// A blocking client able to GET a JSON document.
///
/// Implemented for [`reqwest::blocking::Client`], tests use an in-memory client instead.
pub trait Client {
    /// Sends a GET request to `url` and deserializes the response body as JSON.
    ///
    /// # Errors
    ///
    /// An [`Err`] of [`ErrorKind::IO`] is returned when the request cannot be sent.
    /// An [`Err`] of [`ErrorKind::Status`] is returned when the response status is not a success.
    /// An [`Err`] of [`ErrorKind::Deserialize`] is returned when the body is not the expected
    /// JSON.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::new(ErrorKind::Status, status.to_string()));
        }

        resp.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
    }
}

/// Builds the HTTP client used against the API, applying the request timeout from `config`.
///
/// # Errors
///
/// An [`Err`] is returned when the underlying TLS backend cannot be initialised.
pub fn http_client(config: &Config) -> Result<reqwest::blocking::Client, Error> {
    trace!("Building HTTP client with a timeout of {:?}", config.timeout);
    // `None` disables the timeout, reqwest::blocking would otherwise default to 30s
    reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| Error::wrap(ErrorKind::IO, e).with_message("Cannot build HTTP client"))
}

#[cfg(test)]
pub(crate) use test::MockClient;
