// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Kernel version normalization and matching
//!
//! This module turns `uname -r` style kernel strings into the form used by
//! the release table and decides whether a kernel string corresponds to a
//! table entry.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing flavor suffix such as "-default" or "-preempt"
static FLAVOR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\w+$").expect("FLAVOR_SUFFIX must compile"));

/// Strip the kernel flavor suffix from a kernel version string
///
/// Removes a trailing dash followed by word characters. Strings without
/// such a suffix are returned unchanged.
///
/// # Arguments
/// * `kernel` - Kernel version string (e.g. "4.12.14-122.37-default")
///
/// # Returns
/// The kernel string without its flavor suffix
///
/// # Examples
/// ```
/// use sle_kernel_check::version::normalize;
/// assert_eq!(normalize("4.12.14-122.37-default"), "4.12.14-122.37");
/// assert_eq!(normalize("4.12.14-122.37"), "4.12.14-122.37");
/// ```
pub fn normalize(kernel: &str) -> &str {
    match FLAVOR_SUFFIX.find(kernel) {
        Some(suffix) => &kernel[..suffix.start()],
        None => kernel,
    }
}

/// Check whether a normalized kernel string corresponds to a table entry
///
/// Exact equality always matches. Table entries sometimes carry a build
/// revision digit (".1") that `uname -r` does not report, so a table entry
/// ending in a dot and a single digit also matches the candidate with that
/// suffix removed. The candidate itself is never stripped.
///
/// # Arguments
/// * `candidate` - Normalized kernel string to look up
/// * `table_entry` - Kernel version as recorded in the release table
///
/// # Returns
/// `true` if the candidate is the kernel recorded by the table entry
///
/// # Examples
/// ```
/// use sle_kernel_check::version::matches;
/// assert!(matches("4.12.14-197.78", "4.12.14-197.78.1"));
/// assert!(!matches("4.12.14-197.78.1", "4.12.14-197.78"));
/// ```
pub fn matches(candidate: &str, table_entry: &str) -> bool {
    candidate == table_entry
        || strip_build_revision(table_entry).is_some_and(|stripped| stripped == candidate)
}

/// Remove a trailing ".<digit>" build revision, if there is exactly one digit
fn strip_build_revision(entry: &str) -> Option<&str> {
    let without_digit = entry.strip_suffix(|c: char| c.is_ascii_digit())?;
    without_digit.strip_suffix('.')
}
