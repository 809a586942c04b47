//! Kind cluster lifecycle with pluggable collaborators
//!
//! This crate provides the three collaborators of the `kind stop` command
//! (cluster lookup, container runtime, progress reporting) as traits with
//! production and mock implementations, plus the orchestrator that composes
//! them.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod docker;
pub mod locator;
pub mod progress;
pub mod runtime;
pub mod stopper;

pub use docker::{DockerConnector, DockerRuntime};
pub use locator::{ClusterLocator, KindLocator, MockLocator};
pub use progress::{MockReporter, ProgressReporter, SilentReporter, SpinnerReporter};
pub use runtime::{ContainerRuntime, ListOptions, MockRuntime, RuntimeConnector};
pub use stopper::ClusterStopper;

// Re-export commonly used types
pub use enabler_core::{ClusterContext, ContainerRecord, StopConfig, StopReport};
