//! Logging setup
//!
//! Log lines and the progress spinner share stderr. Every log write hides
//! the spinner for its duration so the two never interleave.

use enabler_kind::SpinnerReporter;
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Install the global subscriber, writing to stderr around `spinner`
pub fn init(verbose: bool, spinner: &SpinnerReporter) {
    // RUST_LOG wins when set
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(SpinnerAwareStderr::new(spinner.clone()))
        .init();
}

/// Stderr writer that suspends a spinner while writing
#[derive(Debug, Clone)]
pub struct SpinnerAwareStderr {
    spinner: SpinnerReporter,
}

impl SpinnerAwareStderr {
    pub const fn new(spinner: SpinnerReporter) -> Self {
        Self { spinner }
    }
}

impl<'a> MakeWriter<'a> for SpinnerAwareStderr {
    type Writer = SuspendedStderr<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendedStderr {
            spinner: &self.spinner,
        }
    }
}

pub struct SuspendedStderr<'a> {
    spinner: &'a SpinnerReporter,
}

impl Write for SuspendedStderr<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.spinner.suspend(|| io::stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // One suspension per log line
        self.spinner.suspend(|| io::stderr().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
