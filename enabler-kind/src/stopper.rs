//! Stops the node containers of a kind cluster
//!
//! Kind names its node containers `<cluster>-control-plane` and
//! `<cluster>-worker`, `<cluster>-worker2`, ... The stopper finds them by
//! name and stops the ones that are running, one at a time.

use enabler_core::{ContainerRecord, Result, StopConfig, StopEntry, StopOutcome, StopReport};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::locator::ClusterLocator;
use crate::progress::{ProgressReporter, SilentReporter};
use crate::runtime::{ContainerRuntime, ListOptions, RuntimeConnector};

/// Label shown next to the progress indicator
pub const PROGRESS_LABEL: &str = "Stopping containers...";

/// Orchestrates `kind stop`: locate, list, stop, report
///
/// Never exits the process. Every failure comes back as an
/// [`enabler_core::Error`]; per-container stop failures are recorded in the
/// returned [`StopReport`] instead.
pub struct ClusterStopper {
    config: StopConfig,
    locator: Arc<dyn ClusterLocator>,
    connector: Arc<dyn RuntimeConnector>,
    reporter: Arc<dyn ProgressReporter>,
}

impl ClusterStopper {
    /// Create a stopper that reports no progress
    #[must_use]
    pub fn new(
        config: StopConfig,
        locator: Arc<dyn ClusterLocator>,
        connector: Arc<dyn RuntimeConnector>,
    ) -> Self {
        Self {
            config,
            locator,
            connector,
            reporter: Arc::new(SilentReporter),
        }
    }

    /// Show progress through `reporter` while containers are being stopped
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Stop the cluster
    ///
    /// # Errors
    /// - [`enabler_core::Error::ClusterNotFound`] if the cluster lookup fails
    /// - [`enabler_core::Error::RuntimeUnavailable`] if the runtime cannot be reached
    /// - [`enabler_core::Error::ListFailure`] if the containers cannot be listed
    pub async fn run(&self) -> Result<StopReport> {
        let context = &self.config.context;
        debug!(kube_context = %context, "Locating kind cluster");

        if let Err(e) = self.locator.locate(context).await {
            error!(
                kube_context = %context,
                error = %e,
                "Kind cluster {} doesn't exist, terminating.",
                context
            );
            return Err(e);
        }

        let runtime = self.connector.connect().await?;
        let options = ListOptions::for_cluster(context);
        let containers = runtime.list(&options).await?;

        debug!(
            kube_context = %context,
            matched = containers.len(),
            "Listed cluster containers"
        );

        if containers.is_empty() {
            warn!(kube_context = %context, "No containers found for kind cluster {}", context);
        }

        self.reporter.start(PROGRESS_LABEL);

        let mut report = StopReport::new(context.clone());
        for record in &containers {
            let entry = StopEntry::new(record, self.stop_one(runtime.as_ref(), record).await);
            entry.emit_trace();
            report.push(entry);
        }

        self.reporter.finish();

        info!(
            kube_context = %context,
            stopped = report.stopped(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Kind cluster \"{}\" was stopped.",
            context
        );

        Ok(report)
    }

    async fn stop_one(
        &self,
        runtime: &dyn ContainerRuntime,
        record: &ContainerRecord,
    ) -> StopOutcome {
        if !record.state.is_running() {
            return StopOutcome::Skipped {
                state: record.state.clone(),
            };
        }

        match runtime.stop(&record.id, self.config.stop_timeout).await {
            Ok(()) => StopOutcome::Stopped,
            Err(e) => StopOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

impl std::fmt::Debug for ClusterStopper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterStopper")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
