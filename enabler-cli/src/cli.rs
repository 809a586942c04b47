//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use enabler_core::{ClusterContext, MissingClusterPolicy};

#[derive(Parser)]
#[command(name = "enabler")]
#[command(about = "Enabler CLI for ease of setup of microservice based apps", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The kubernetes context to use
    #[arg(
        long,
        global = true,
        env = "ENABLER_KUBE_CONTEXT",
        default_value = ClusterContext::DEFAULT
    )]
    pub kube_context: ClusterContext,

    /// Exit non-zero when the kind cluster does not exist
    #[arg(long, global = true, env = "ENABLER_FAIL_ON_MISSING_CLUSTER")]
    pub fail_on_missing_cluster: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Exit behavior for a missing cluster
    pub fn missing_cluster_policy(&self) -> MissingClusterPolicy {
        if self.fail_on_missing_cluster {
            MissingClusterPolicy::Fail
        } else {
            MissingClusterPolicy::Ignore
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage kind clusters
    Kind {
        #[command(subcommand)]
        command: KindCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum KindCommands {
    /// Stop kind cluster
    Stop(StopArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StopArgs {
    /// Seconds to wait for each container before it is killed
    #[arg(long, env = "ENABLER_STOP_TIMEOUT", default_value = "5")]
    pub timeout: u64,

    /// kind executable used to look the cluster up
    #[arg(long, env = "ENABLER_KIND_BINARY", default_value = "kind")]
    pub kind_binary: String,

    /// Do not show a progress spinner
    #[arg(long)]
    pub no_progress: bool,
}
