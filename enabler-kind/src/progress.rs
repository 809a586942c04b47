//! Terminal progress indicators

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Shows the user that work is in flight
///
/// A reporter owns its own animation and teardown; callers only mark the
/// start and the end of the work.
pub trait ProgressReporter: Send + Sync {
    /// Begin showing progress under `label`
    fn start(&self, label: &str);

    /// Stop showing progress and clear the indicator
    fn finish(&self);
}

/// Animated spinner on stderr
#[derive(Clone)]
pub struct SpinnerReporter {
    bar: ProgressBar,
    tick: Duration,
}

impl SpinnerReporter {
    /// Default animation interval
    pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

    /// Create a spinner with the default animation interval
    #[must_use]
    pub fn new() -> Self {
        Self::with_tick(Self::DEFAULT_TICK)
    }

    /// Create a spinner redrawn every `tick`
    #[must_use]
    pub fn with_tick(tick: Duration) -> Self {
        let bar = ProgressBar::new_spinner();
        match ProgressStyle::with_template("{msg} {spinner:.green}") {
            // Last tick char is shown once finished
            Ok(style) => bar.set_style(style.tick_chars("|/-\\ ")),
            Err(e) => tracing::debug!(error = %e, "Falling back to default spinner style"),
        }
        Self { bar, tick }
    }

    /// Run `f` with the spinner hidden, redrawing it afterwards
    ///
    /// Anything else writing to the terminal while the spinner is active
    /// goes through here so the output does not interleave with frames.
    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.bar.suspend(f)
    }
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SpinnerReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinnerReporter")
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl ProgressReporter for SpinnerReporter {
    fn start(&self, label: &str) {
        self.bar.set_message(label.to_string());
        self.bar.enable_steady_tick(self.tick);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Reporter that shows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn start(&self, label: &str) {
        tracing::trace!(label, "Progress started");
    }

    fn finish(&self) {
        tracing::trace!("Progress finished");
    }
}

/// Reporter that counts its lifecycle calls (for testing)
#[derive(Debug, Default)]
pub struct MockReporter {
    starts: AtomicUsize,
    finishes: AtomicUsize,
    labels: Mutex<Vec<String>>,
}

impl MockReporter {
    /// Create a mock reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `start` calls
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Number of `finish` calls
    pub fn finishes(&self) -> usize {
        self.finishes.load(Ordering::SeqCst)
    }

    /// Labels passed to `start`, in order
    pub fn labels(&self) -> Vec<String> {
        self.labels
            .lock()
            .map(|labels| labels.clone())
            .unwrap_or_default()
    }
}

impl ProgressReporter for MockReporter {
    fn start(&self, label: &str) {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut labels) = self.labels.lock() {
            labels.push(label.to_string());
        }
    }

    fn finish(&self) {
        self.finishes.fetch_add(1, Ordering::SeqCst);
    }
}
