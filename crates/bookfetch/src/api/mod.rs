use std::time::Duration;

use serde::de::DeserializeOwned;

pub mod google_books;
pub mod open_library;

const JSON_TIMEOUT: Duration = Duration::from_secs(15);
const BYTES_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP GET used by every data source.
///
/// Implemented for [`reqwest::blocking::Client`]; tests provide their own implementation so
/// that no network access is needed.
pub trait Client
where
    Self: Default,
{
    /// Fetches `url` and decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error is returned when the request fails or the status is not a
    /// success, and an [`ErrorKind::Deserialize`] error when the body is not the expected JSON.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;

    /// Fetches `url` and returns the raw body.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error is returned when the request fails or the status is not a
    /// success.
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, Error>;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .timeout(JSON_TIMEOUT)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, Error> {
        let bytes = self
            .get(url)
            .timeout(BYTES_TIMEOUT)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::bytes)
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;

        Ok(bytes.to_vec())
    }
}

/// Builds `base?key=value&..` with form encoded values.
pub(crate) fn url_with_params<'a, I>(base: &str, params: I) -> Result<String, Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    url::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| Error::wrap_with(ErrorKind::Deserialize, format!("Invalid url '{base}'"), e))
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer, URL_SINK,
};

use crate::{Error, ErrorKind};
