//! Stop command implementation

use anyhow::Result;
use enabler_core::{ClusterContext, StopConfig};
use enabler_kind::{
    ClusterStopper, DockerConnector, KindLocator, ProgressReporter, SilentReporter,
    SpinnerReporter,
};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::StopArgs;

pub async fn execute(
    context: ClusterContext,
    args: &StopArgs,
    spinner: SpinnerReporter,
) -> Result<()> {
    tracing::debug!(kube_context = %context, "Using kube-context: kind-{}", context);

    let config = StopConfig::new(context)
        .with_timeout(Duration::from_secs(args.timeout))
        .with_kind_binary(&args.kind_binary);

    let show_progress = !args.no_progress && std::io::stderr().is_terminal();
    let reporter: Arc<dyn ProgressReporter> = if show_progress {
        Arc::new(spinner)
    } else {
        Arc::new(SilentReporter)
    };

    let locator = KindLocator::new(config.kind_binary.clone());
    let stopper = ClusterStopper::new(config, Arc::new(locator), Arc::new(DockerConnector::new()))
        .with_reporter(reporter);

    stopper.run().await?;

    Ok(())
}
