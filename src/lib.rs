// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! SLES Kernel Currency Check Library
//!
//! This library extracts the per-service-pack kernel release table from the
//! SUSE kernel versions TID, matches `uname -r` style kernel strings against
//! it, and reports the standard and LTSS releases published after a kernel.

pub mod analyze;
pub mod error;
pub mod report;
pub mod source;
pub mod table;
pub mod version;

// Re-export commonly used items at the crate root for convenience
pub use analyze::{
    KernelRelease, LTSS_SUFFIX, MissingReleases, find_kernel_release, find_os_version,
    is_pre_ltss, ltss_label, missing_releases,
};
pub use error::{Error, Result};
pub use report::Report;
pub use source::{DEFAULT_TIMEOUT_SECS, DocumentSource, TID_URL};
pub use table::{ReleaseEntry, ReleaseTable, extract, extract_html};
pub use version::{matches, normalize};
