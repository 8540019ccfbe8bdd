// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Retrieval of the kernel release document
//!
//! The document normally comes from the SUSE kernel versions TID, but the
//! location is configurable so that alternate endpoints and local fixture
//! files can be used instead.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

/// SUSE TID listing kernel versions per SLES service pack
pub const TID_URL: &str = "https://www.suse.com/support/kb/doc/?id=000019587";

/// Default time allowed for fetching the document
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the release document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Fetch over HTTP(S)
    Remote {
        /// Document URL
        url: String,
        /// Request timeout
        timeout: Duration,
        /// Accept invalid TLS certificates
        insecure: bool,
    },
    /// Read a local markup file
    File(PathBuf),
}

impl Default for DocumentSource {
    fn default() -> Self {
        Self::remote(TID_URL)
    }
}

impl DocumentSource {
    /// Remote source with the default timeout and TLS verification enabled
    pub fn remote(url: impl Into<String>) -> Self {
        Self::Remote {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            insecure: false,
        }
    }

    /// Human-readable location, for messages
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::Remote { url, .. } => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Load the raw markup
    ///
    /// # Errors
    /// Returns [`Error::Timeout`], [`Error::Fetch`] or [`Error::HttpStatus`]
    /// for remote failures and [`Error::Read`] if a local file cannot be read
    pub fn load(&self) -> Result<String> {
        match self {
            Self::Remote {
                url,
                timeout,
                insecure,
            } => fetch(url, *timeout, *insecure),
            Self::File(path) => {
                debug!("Reading release document from {}", path.display());
                fs::read_to_string(path).map_err(|source| Error::Read {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

fn fetch(url: &str, timeout: Duration, insecure: bool) -> Result<String> {
    debug!("Fetching release document from {url}");

    let resp = attohttpc::get(url)
        .timeout(timeout)
        .danger_accept_invalid_certs(insecure)
        .send()
        .map_err(|e| classify(url, timeout, e))?;

    if !resp.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }

    let body = resp.text().map_err(|e| classify(url, timeout, e))?;
    debug!("Fetched {} bytes", body.len());
    Ok(body)
}

/// Separate timeouts from other transport failures
fn classify(url: &str, timeout: Duration, err: attohttpc::Error) -> Error {
    if let attohttpc::ErrorKind::Io(io_err) = err.kind()
        && matches!(
            io_err.kind(),
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
        )
    {
        return Error::Timeout {
            url: url.to_string(),
            secs: timeout.as_secs(),
        };
    }
    Error::Fetch {
        url: url.to_string(),
        source: err,
    }
}
