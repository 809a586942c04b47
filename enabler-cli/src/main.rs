//! Enabler CLI
//!
//! Manages the local kind cluster backing an Enabler development setup.

use clap::Parser;
use std::process;

mod cli;
mod commands;
mod logging;

use cli::Cli;
use enabler_core::MissingClusterPolicy;
use enabler_core::error::EXIT_FAILURE;
use enabler_kind::SpinnerReporter;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Shared with the logger so log lines hide it while they print
    let spinner = SpinnerReporter::new();
    logging::init(cli.verbose, &spinner);

    let policy = cli.missing_cluster_policy();

    // Execute the command
    let result = commands::dispatch(cli, spinner).await;

    // Handle errors
    if let Err(e) = result {
        let code = exit_code(&e, policy);
        // A missing cluster has already been logged by the stopper
        if code != 0 {
            eprintln!("❌ Error: {e:#}");
        }
        process::exit(code);
    }
}

/// Map a command failure to the process exit code
fn exit_code(err: &anyhow::Error, policy: MissingClusterPolicy) -> i32 {
    err.downcast_ref::<enabler_core::Error>()
        .map_or(EXIT_FAILURE, |e| e.exit_code(policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_from_library_error() {
        let err = anyhow::Error::new(enabler_core::Error::ClusterNotFound {
            context: "dev".to_string(),
            exit_code: Some(7),
            detail: String::new(),
        });
        assert_eq!(exit_code(&err, MissingClusterPolicy::Ignore), 7);
    }

    #[test]
    fn test_exit_code_survives_context() {
        let err = anyhow::Error::new(enabler_core::Error::ListFailure {
            filters: "dev-worker".to_string(),
            message: String::new(),
        })
        .context("while stopping");
        assert_eq!(exit_code(&err, MissingClusterPolicy::Ignore), 70);
    }

    #[test]
    fn test_fail_flag_decides_missing_cluster_exit() {
        let err = anyhow::Error::new(enabler_core::Error::ClusterNotFound {
            context: "dev".to_string(),
            exit_code: None,
            detail: "not listed".to_string(),
        });

        let default = Cli::try_parse_from(["enabler", "kind", "stop"]).unwrap();
        assert_eq!(exit_code(&err, default.missing_cluster_policy()), 0);

        let strict =
            Cli::try_parse_from(["enabler", "--fail-on-missing-cluster", "kind", "stop"]).unwrap();
        assert_eq!(exit_code(&err, strict.missing_cluster_policy()), EXIT_FAILURE);
    }

    #[test]
    fn test_exit_code_for_foreign_error() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code(&err, MissingClusterPolicy::Fail), EXIT_FAILURE);
    }
}
