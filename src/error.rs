// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Error types for sle-kernel-check

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the release document or analyzing a kernel
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be completed
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: attohttpc::Error,
    },

    /// The HTTP request did not complete within the configured timeout
    #[error("Timed out after {secs}s fetching {url}")]
    Timeout { url: String, secs: u64 },

    /// The server answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// A local document could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The kernel matches no entry of the release table
    #[error("Kernel {kernel} not found in the release table")]
    KernelNotFound { kernel: String },

    /// The report could not be serialized
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for sle-kernel-check operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_not_found_display() {
        let err = Error::KernelNotFound {
            kernel: "5.3.18-59".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Kernel 5.3.18-59 not found in the release table"
        );
    }

    #[test]
    fn test_read_error_display_includes_path() {
        let err = Error::Read {
            path: PathBuf::from("/tmp/tid.html"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/tmp/tid.html"));
    }

    #[test]
    fn test_http_status_display() {
        let err = Error::HttpStatus {
            url: "https://example.invalid/".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch https://example.invalid/: HTTP 503"
        );
    }
}
