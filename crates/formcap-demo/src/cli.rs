#![forbid(unsafe_code)]

//! Command-line argument parsing for the capture demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `FORMCAP_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Formcap Demo: a line-oriented capture session on stdin

Type lines to build up a draft. Submit forwards the draft, verbatim,
to the sink (stderr); clear resets the draft to empty. The draft is
never altered by submission.

USAGE:
    formcap-demo [OPTIONS]

OPTIONS:
    --prefill=TEXT   Start the session with TEXT already in the draft
    --label=NAME     Label for captured output (default: capture)
    --raw            Emit captured values without the label prefix
    --log            Enable tracing output on stderr
    --help, -h       Show this help message
    --version, -V    Show version

COMMANDS:
    :submit          Forward the current draft to the sink
    :clear           Reset the draft to the empty string
    :show            Print the draft with grapheme/width/revision metrics
    :quit            Exit and print session totals
    (any other line is appended to the draft)

ENVIRONMENT VARIABLES:
    FORMCAP_PREFILL  Override --prefill
    FORMCAP_LABEL    Override --label
    FORMCAP_LOG      Tracing filter, e.g. 'debug' or 'formcap_core=trace';
                     setting it also enables tracing output";

/// Parsed command-line options.
pub struct Opts {
    /// Initial draft contents (empty = start blank).
    pub prefill: String,
    /// Label prepended to captured output lines.
    pub label: String,
    /// Emit captured values without the label prefix.
    pub raw: bool,
    /// Install a tracing subscriber on stderr.
    pub log: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            prefill: String::new(),
            label: "capture".into(),
            raw: false,
            log: false,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Ok(val) = env::var("FORMCAP_PREFILL") {
            opts.prefill = val;
        }
        if let Ok(val) = env::var("FORMCAP_LABEL") {
            opts.label = val;
        }
        if env::var("FORMCAP_LOG").is_ok() {
            opts.log = true;
        }

        // Parse command-line args (override env vars)
        let args: Vec<String> = env::args().skip(1).collect();
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("formcap-demo {VERSION}");
                    process::exit(0);
                }
                "--raw" => {
                    opts.raw = true;
                }
                "--log" => {
                    opts.log = true;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--prefill=") {
                        opts.prefill = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--label=") {
                        opts.label = val.to_string();
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
            i += 1;
        }

        opts
    }
}
