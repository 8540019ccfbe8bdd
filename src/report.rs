// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Result of checking one kernel against the release table

use std::fmt;

use serde::Serialize;

use crate::analyze::{MissingReleases, is_pre_ltss, locate, missing_after};
use crate::error::Result;
use crate::table::{ReleaseEntry, ReleaseTable};
use crate::version::normalize;

/// Everything known about one kernel
///
/// `os_version` is `None` when the kernel matches no table entry; the
/// remaining fields are then empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Kernel string as given
    pub kernel: String,
    /// Kernel string without its flavor suffix
    pub normalized: String,
    pub os_version: Option<String>,
    pub pre_ltss: bool,
    pub release_date: Option<String>,
    pub missing: Vec<ReleaseEntry>,
    pub ltss: Vec<ReleaseEntry>,
}

impl Report {
    /// Check a kernel against a release table
    #[must_use]
    pub fn build(kernel: &str, table: &ReleaseTable) -> Self {
        let mut report = Self {
            kernel: kernel.to_string(),
            normalized: normalize(kernel).to_string(),
            os_version: None,
            pre_ltss: false,
            release_date: None,
            missing: Vec::new(),
            ltss: Vec::new(),
        };

        let Some(location) = locate(kernel, table) else {
            return report;
        };

        let MissingReleases { newer, ltss } = missing_after(location, table);
        report.pre_ltss = is_pre_ltss(location.os_version, table);
        report.os_version = Some(location.os_version.to_string());
        report.release_date = Some(location.entry.release_date.clone());
        report.missing = newer;
        report.ltss = ltss;

        report
    }

    /// Whether the kernel was found in the table
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.os_version.is_some()
    }

    /// Number of releases newer than the kernel, LTSS included
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.missing.len() + self.ltss.len()
    }

    /// Pretty-printed JSON form
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(os_version) = &self.os_version else {
            return writeln!(f, "Kernel {} not found in the release table", self.kernel);
        };

        let pre_ltss = if self.pre_ltss { "yes" } else { "no" };
        writeln!(f, "OS version: {os_version} (pre-LTSS: {pre_ltss})")?;

        writeln!(f, "Missing releases: {}", self.missing.len())?;
        write_entries(f, &self.missing)?;

        if self.pre_ltss {
            writeln!(f, "Missing LTSS releases: {}", self.ltss.len())?;
            write_entries(f, &self.ltss)?;
        }

        let released = self.release_date.as_deref().unwrap_or("unknown");
        match self.missing_count() {
            0 => writeln!(
                f,
                "Kernel {} released {released}: up to date",
                self.normalized
            ),
            n => writeln!(
                f,
                "Kernel {} released {released}: {n} newer release(s) available",
                self.normalized
            ),
        }
    }
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &[ReleaseEntry]) -> fmt::Result {
    for entry in entries {
        writeln!(f, "  {}  {}", entry.release_date, entry.kernel_version)?;
    }
    Ok(())
}
