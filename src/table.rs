// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Release table extraction
//!
//! The kernel release TID is a set of loosely structured HTML tables. Each
//! OS version starts with a header row whose second cell names it (e.g.
//! "SLES12 SP5"), followed by data rows of release date and kernel
//! version. This module turns that markup into a [`ReleaseTable`] that keeps
//! both OS order and per-OS release order as they appear in the document.
//!
//! All markup heuristics live behind [`extract`] so they can change without
//! touching matching or analysis.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use serde::Serialize;
use tracing::{debug, warn};

/// Annotation cells such as "(respin)" that carry no kernel version
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(.*\)$").expect("PARENTHETICAL must compile"));

/// One published kernel for one OS version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseEntry {
    /// Release date as written in the document
    pub release_date: String,
    /// Kernel version as written in the document
    pub kernel_version: String,
}

impl ReleaseEntry {
    pub fn new(release_date: impl Into<String>, kernel_version: impl Into<String>) -> Self {
        Self {
            release_date: release_date.into(),
            kernel_version: kernel_version.into(),
        }
    }
}

/// OS version label with its releases in document order
#[derive(Debug, Clone, PartialEq, Eq)]
struct OsSection {
    os_version: String,
    entries: Vec<ReleaseEntry>,
}

/// Ordered mapping from OS version label to its releases
///
/// Iteration follows the order in which OS versions first appeared in the
/// document. The table is read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseTable {
    sections: Vec<OsSection>,
}

impl ReleaseTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the entry list for an OS version
    ///
    /// A repeated label keeps its original position but loses its earlier
    /// entries.
    pub fn begin_section(&mut self, os_version: impl Into<String>) {
        let os_version = os_version.into();
        match self.section_mut(&os_version) {
            Some(section) => section.entries.clear(),
            None => self.sections.push(OsSection {
                os_version,
                entries: Vec::new(),
            }),
        }
    }

    /// Append an entry to an OS version, creating the section if needed
    pub fn push(&mut self, os_version: &str, entry: ReleaseEntry) {
        if self.section_mut(os_version).is_none() {
            self.begin_section(os_version);
        }
        if let Some(section) = self.section_mut(os_version) {
            section.entries.push(entry);
        }
    }

    /// Releases recorded for an OS version
    #[must_use]
    pub fn get(&self, os_version: &str) -> Option<&[ReleaseEntry]> {
        self.sections
            .iter()
            .find(|s| s.os_version == os_version)
            .map(|s| s.entries.as_slice())
    }

    #[must_use]
    pub fn contains(&self, os_version: &str) -> bool {
        self.get(os_version).is_some()
    }

    /// OS version labels in document order
    pub fn os_versions(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.os_version.as_str())
    }

    /// (OS version, releases) pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ReleaseEntry])> {
        self.sections
            .iter()
            .map(|s| (s.os_version.as_str(), s.entries.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn section_mut(&mut self, os_version: &str) -> Option<&mut OsSection> {
        self.sections
            .iter_mut()
            .find(|s| s.os_version == os_version)
    }
}

/// Parse raw markup and extract its release table
///
/// # Arguments
/// * `markup` - HTML source of the kernel release TID
///
/// # Returns
/// The extracted table; empty if the markup holds no recognizable sections
#[must_use]
pub fn extract_html(markup: &str) -> ReleaseTable {
    extract(&Html::parse_document(markup))
}

/// Extract the release table from a parsed document
///
/// Rows are visited in document order wherever they are nested. Empty rows
/// are skipped. A row whose second cell contains "SLE" opens a new OS
/// version section; any other row contributes its kernel versions to the
/// current section. Rows before the first section header are ignored.
#[must_use]
pub fn extract(document: &Html) -> ReleaseTable {
    let mut table = ReleaseTable::new();
    let mut current: Option<String> = None;

    for row in rows(document) {
        if row.text().all(|t| t.trim().is_empty()) {
            continue;
        }

        let cells: Vec<String> = cells(row).take(2).map(cell_text).collect();
        let [release, version] = cells.as_slice() else {
            debug!("skipping row with fewer than two cells");
            continue;
        };

        if version.contains("SLE") {
            let os_version = version.replace("SLE12", "SLES12");
            debug!("found OS version section {os_version}");
            table.begin_section(os_version.clone());
            current = Some(os_version);
            continue;
        }

        let Some(os_version) = current.as_deref() else {
            warn!("ignoring release row before any OS version header: {version}");
            continue;
        };

        for kernel in kernel_versions(version) {
            table.push(os_version, ReleaseEntry::new(release.as_str(), kernel));
        }
    }

    table
}

/// Kernel versions recorded in a single version cell
///
/// A cell may list several tab-separated kernels; annotations are dropped.
fn kernel_versions(cell: &str) -> impl Iterator<Item = &str> {
    cell.split('\t')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(strip_angle_brackets)
        .filter(|piece| {
            let annotation = is_annotation(piece);
            if annotation {
                debug!("dropping annotation {piece}");
            }
            !annotation
        })
}

fn strip_angle_brackets(piece: &str) -> &str {
    piece
        .strip_prefix('<')
        .and_then(|p| p.strip_suffix('>'))
        .unwrap_or(piece)
}

fn is_annotation(piece: &str) -> bool {
    PARENTHETICAL.is_match(piece) || piece.contains("release") || piece.contains("rebuild")
}

fn rows(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
}

fn cells(row: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_angle_brackets() {
        assert_eq!(strip_angle_brackets("<4.12.14-122.37>"), "4.12.14-122.37");
        assert_eq!(strip_angle_brackets("<4.12.14"), "<4.12.14");
        assert_eq!(strip_angle_brackets("4.12.14"), "4.12.14");
    }

    #[test]
    fn test_is_annotation() {
        assert!(is_annotation("(respin)"));
        assert!(is_annotation("no release"));
        assert!(is_annotation("kernel rebuild"));
        assert!(!is_annotation("4.12.14-122.37"));
        assert!(!is_annotation("4.12.14 (respin)"));
        // Case-sensitive on purpose
        assert!(!is_annotation("Release notes"));
    }

    #[test]
    fn test_kernel_versions_splits_tabs() {
        let versions: Vec<&str> = kernel_versions("4.12.14-1\t \t<4.12.14-2>\t(x)").collect();
        assert_eq!(versions, ["4.12.14-1", "4.12.14-2"]);
    }

    #[test]
    fn test_begin_section_resets_in_place() {
        let mut table = ReleaseTable::new();
        table.push("A", ReleaseEntry::new("d1", "k1"));
        table.push("B", ReleaseEntry::new("d2", "k2"));
        table.begin_section("A");
        assert_eq!(table.os_versions().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(table.get("A"), Some(&[][..]));
    }
}
