#![forbid(unsafe_code)]

//! Interactive capture demo.
//!
//! Reads stdin lines into a draft; `:submit` forwards the draft, verbatim,
//! to a sink on stderr and `:clear` resets it to empty. Run with `--help`
//! for options and commands.

mod cli;
mod session;

use std::io::{self, BufRead};
use std::process;

use formcap_core::{ConfigError, SinkError, WriterSink};

use crate::cli::Opts;
use crate::session::{Feed, Session};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("sink rejected the draft: {0}")]
    Sink(#[from] SinkError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DemoError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Sink(_) | Self::Io(_) => 1,
        }
    }
}

fn main() {
    let opts = Opts::parse();
    if opts.log {
        init_tracing();
    }
    if let Err(error) = run(&opts) {
        eprintln!("{error}");
        process::exit(error.exit_code());
    }
}

fn run(opts: &Opts) -> Result<(), DemoError> {
    let sink = if opts.raw {
        WriterSink::stderr()
    } else {
        WriterSink::stderr().with_label(&opts.label)
    };
    let mut session = Session::new(&opts.prefill, sink)?;

    println!("formcap-demo: type lines; :submit, :clear, :show, :quit");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match session.feed(&line?)? {
            Feed::Continue(feedback) => {
                if !feedback.is_empty() {
                    println!("{feedback}");
                }
            }
            Feed::Quit(summary) => {
                println!("{summary}");
                return Ok(());
            }
        }
    }

    // EOF without :quit still reports totals.
    println!("{}", session.summary());
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("FORMCAP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
