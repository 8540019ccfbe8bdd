// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! sle-kernel-check - Main Application
//!
//! Fetches the SUSE kernel versions TID, locates the given kernel in it and
//! prints the newer standard and LTSS releases for its service pack.
//!
//! Exits with status 1 when the kernel cannot be found or the release table
//! cannot be retrieved.

mod cli;

use std::error::Error;
use std::process::exit;
use std::time::Duration;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use sle_kernel_check::{DEFAULT_TIMEOUT_SECS, DocumentSource, Report, TID_URL, extract_html};

/// Main application entry point
///
/// Parses command line arguments, runs the check and maps the outcome to the
/// process exit status.
fn main() {
    let cli = Cli::parse();

    // Handle completion generation first (exits immediately)
    if cli.completion.is_some() {
        print_bash_completion();
        return;
    }

    init_tracing(cli.verbose);

    let Some(kernel) = cli.kernel.as_deref() else {
        eprintln!(
            "sle-kernel-check: missing kernel version\nTry 'sle-kernel-check --help' for more information."
        );
        exit(1);
    };

    match cmd_check(kernel, &document_source(&cli), cli.json) {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    }
}

/// Initialize the tracing subscriber for logging
///
/// `--verbose` forces debug output for this crate; otherwise `RUST_LOG` is
/// honoured and warnings are shown by default. Logs go to stderr.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sle_kernel_check=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("sle_kernel_check=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Build the document source from command line options
fn document_source(cli: &Cli) -> DocumentSource {
    if let Some(path) = &cli.document {
        return DocumentSource::File(path.clone());
    }
    DocumentSource::Remote {
        url: cli.url.clone().unwrap_or_else(|| TID_URL.to_string()),
        timeout: Duration::from_secs(cli.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        insecure: cli.insecure,
    }
}

/// Check a kernel and print the report
///
/// # Returns
/// `true` if the kernel was found in the release table
fn cmd_check(
    kernel: &str,
    source: &DocumentSource,
    json: bool,
) -> Result<bool, Box<dyn Error>> {
    let markup = source.load()?;
    let table = extract_html(&markup);
    debug!(
        "Extracted {} OS version(s) from {}",
        table.len(),
        source.location()
    );

    let report = Report::build(kernel, &table);
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }

    Ok(report.is_found())
}

/// Print bash completion script
fn print_bash_completion() {
    print!(
        r#"# bash completion for sle-kernel-check

_sle_kernel_check_completions() {{
    local cur prev
    COMPREPLY=()
    cur="${{COMP_WORDS[COMP_CWORD]}}"
    prev="${{COMP_WORDS[COMP_CWORD-1]}}"

    case "${{prev}}" in
        -d|--document)
            COMPREPLY=($(compgen -f -- "${{cur}}"))
            return
            ;;
    esac

    if [[ "${{cur}}" == -* ]]; then
        local options=(
            "--completion    (Generate shell completion script)"
            "-d              (Read the release table from a local HTML file)"
            "--document      (Read the release table from a local HTML file)"
            "-h              (Print help)"
            "--help          (Print help)"
            "--json          (Print the result as JSON)"
            "-k              (Skip TLS certificate verification)"
            "--insecure      (Skip TLS certificate verification)"
            "-t              (Seconds to wait for the download)"
            "--timeout       (Seconds to wait for the download)"
            "--url           (Fetch the release table from this URL)"
            "-v              (Make the operation more talkative)"
            "--verbose       (Make the operation more talkative)"
            "--version       (Print version)"
        )

        local IFS=$'\n'
        local opt name padded
        local width=$((COLUMNS - 1))
        for opt in "${{options[@]}}"; do
            name="${{opt%%  *}}"
            if [[ "$name" == "${{cur}}"* ]]; then
                printf -v padded "%-${{width}}s" "$opt"
                COMPREPLY+=("$padded")
            fi
        done

        if ((${{#COMPREPLY[@]}} == 1)); then
            COMPREPLY[0]="${{COMPREPLY[0]%%  *}}"
        fi
    else
        COMPREPLY=($(compgen -W "$(uname -r 2>/dev/null)" -- "${{cur}}"))
    fi
}}

complete -o nosort -F _sle_kernel_check_completions sle-kernel-check
"#
    );
}
