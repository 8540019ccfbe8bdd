// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for sle-kernel-check
//
// Separated from main.rs so that build.rs can include this file
// to generate the man page via clap_mangen.

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parser
#[derive(Parser, Debug)]
#[command(
    name = "sle-kernel-check",
    version,
    about = "Check whether a SLES kernel is current for its service pack",
    disable_version_flag = true
)]
#[command(arg(clap::Arg::new("version").long("version").action(clap::ArgAction::Version).help("Print version")))]
pub struct Cli {
    /// Kernel version to check, as printed by `uname -r`
    #[arg(value_name = "KERNEL")]
    pub kernel: Option<String>,

    /// Fetch the release table from this URL instead of the SUSE TID
    #[arg(long = "url", value_name = "URL", env = "SLE_KERNEL_CHECK_URL")]
    pub url: Option<String>,

    /// Read the release table from a local HTML file (takes precedence over --url)
    #[arg(short = 'd', long = "document", value_name = "FILE")]
    pub document: Option<PathBuf>,

    /// Seconds to wait for the release table to download
    #[arg(short = 't', long = "timeout", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Allow insecure TLS connections (skip certificate verification)
    #[arg(short = 'k', long = "insecure")]
    pub insecure: bool,

    /// Print the result as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Make the operation more talkative
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion script (only bash is supported currently)
    #[arg(long = "completion", value_name = "SHELL", value_parser = parse_completion_shell)]
    pub completion: Option<String>,
}

fn parse_completion_shell(s: &str) -> Result<String, String> {
    match s.to_lowercase().as_str() {
        "bash" => Ok(s.to_lowercase()),
        _ => Err(format!("unsupported shell: {s} (only 'bash' is supported)")),
    }
}
