// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Locating a kernel in the release table and listing what came after it

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::table::{ReleaseEntry, ReleaseTable};
use crate::version::{matches, normalize};

/// Suffix naming the LTSS stream of an OS version
pub const LTSS_SUFFIX: &str = " - LTSS";

/// A kernel resolved against the release table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KernelRelease {
    /// Kernel string with its flavor suffix removed
    pub kernel: String,
    /// Release date of the matching table entry
    pub release_date: String,
}

/// Releases published after a kernel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingReleases {
    /// Newer releases for the same OS version
    pub newer: Vec<ReleaseEntry>,
    /// The whole LTSS stream, when the OS version has moved to LTSS
    pub ltss: Vec<ReleaseEntry>,
}

impl MissingReleases {
    /// Total number of releases the kernel is behind
    #[must_use]
    pub fn total(&self) -> usize {
        self.newer.len() + self.ltss.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Label of the LTSS stream for an OS version (e.g. "SLES12 SP5 - LTSS")
#[must_use]
pub fn ltss_label(os_version: &str) -> String {
    format!("{os_version}{LTSS_SUFFIX}")
}

/// Where a kernel sits in the release table
#[derive(Debug, Clone, Copy)]
pub(crate) struct Location<'t> {
    pub(crate) os_version: &'t str,
    pub(crate) index: usize,
    pub(crate) entry: &'t ReleaseEntry,
}

/// First entry matching a kernel, in table order
pub(crate) fn locate<'t>(kernel: &str, table: &'t ReleaseTable) -> Option<Location<'t>> {
    let candidate = normalize(kernel);
    for (os_version, entries) in table.iter() {
        if let Some((index, entry)) = entries
            .iter()
            .enumerate()
            .find(|(_, e)| matches(candidate, &e.kernel_version))
        {
            return Some(Location {
                os_version,
                index,
                entry,
            });
        }
    }
    None
}

/// Find the OS version a kernel belongs to
///
/// The flavor suffix is removed before searching. OS versions and their
/// entries are searched in table order; the first match wins.
///
/// # Returns
/// `Some(os_version)` if any entry matches, `None` otherwise
#[must_use]
pub fn find_os_version<'t>(kernel: &str, table: &'t ReleaseTable) -> Option<&'t str> {
    locate(kernel, table).map(|loc| loc.os_version)
}

/// Find the normalized kernel and its release date
///
/// Uses the same search as [`find_os_version`].
#[must_use]
pub fn find_kernel_release(kernel: &str, table: &ReleaseTable) -> Option<KernelRelease> {
    locate(kernel, table).map(|loc| KernelRelease {
        kernel: normalize(kernel).to_string(),
        release_date: loc.entry.release_date.clone(),
    })
}

/// Check whether an OS version has a separate LTSS stream
#[must_use]
pub fn is_pre_ltss(os_version: &str, table: &ReleaseTable) -> bool {
    table.contains(&ltss_label(os_version))
}

/// List the releases published after a kernel
///
/// Every entry after the kernel's position in its OS version is newer. When
/// the OS version has an LTSS stream, all LTSS releases are reported as well,
/// including when the kernel is already the last standard release.
///
/// # Errors
/// Returns [`Error::KernelNotFound`] if the kernel matches no table entry
pub fn missing_releases(kernel: &str, table: &ReleaseTable) -> Result<MissingReleases> {
    let location = locate(kernel, table).ok_or_else(|| Error::KernelNotFound {
        kernel: kernel.to_string(),
    })?;
    Ok(missing_after(location, table))
}

/// Releases newer than an already located kernel
pub(crate) fn missing_after(location: Location<'_>, table: &ReleaseTable) -> MissingReleases {
    let os_version = location.os_version;

    let newer = table
        .get(os_version)
        .map(|entries| entries[location.index + 1..].to_vec())
        .unwrap_or_default();

    let ltss = if is_pre_ltss(os_version, table) {
        table
            .get(&ltss_label(os_version))
            .map(<[ReleaseEntry]>::to_vec)
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    debug!(
        "{os_version}: {} newer release(s), {} LTSS release(s)",
        newer.len(),
        ltss.len()
    );

    MissingReleases { newer, ltss }
}
