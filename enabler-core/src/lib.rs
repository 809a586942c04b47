//! Enabler Core - Foundation types, outcomes, and the error taxonomy
//!
//! This crate provides the types shared by the kind collaborators and the CLI.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod outcome;
pub mod types;

pub use config::{MissingClusterPolicy, StopConfig};
pub use error::{Error, ErrorKind, Result};
pub use outcome::{StopEntry, StopOutcome, StopReport};
pub use types::{ClusterContext, ContainerId, ContainerRecord, ContainerState};
