//! HTTP client abstraction for testability
//!
//! Retrieval goes through a small trait so the download pipeline can be
//! exercised in tests with canned responses instead of a live reader.

use crate::io::configuration::USER_AGENT;
use crate::io::error::{RestoreError, Result};

/// Synchronous HTTP GET, returning the response body as bytes
pub trait HttpClient {
    /// Fetch a URL and return the full response body
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError::Http`] for transport failures and
    /// [`RestoreError::HttpStatus`] for non-success responses; the two
    /// are distinct so callers can tell a dead server from a missing
    /// document.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production client backed by `reqwest::blocking`
///
/// Sends a desktop-browser User-Agent with every request; some readers
/// refuse the default client identity. Redirects are followed.
pub struct WebClient {
    client: reqwest::blocking::Client,
}

impl WebClient {
    /// Build a client with the reader-friendly request defaults
    ///
    /// # Errors
    ///
    /// Returns [`RestoreError::Http`] if the underlying client cannot be
    /// constructed (e.g. no TLS backend available).
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| RestoreError::Http {
                url: String::new(),
                source: err,
            })?;
        Ok(Self { client })
    }
}

impl HttpClient for WebClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| RestoreError::Http {
                url: url.to_string(),
                source: err,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RestoreError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|err| RestoreError::Http {
            url: url.to_string(),
            source: err,
        })?;
        Ok(body.to_vec())
    }
}
