//! Core type definitions with strong typing and validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Name of a local kind cluster
///
/// Only emptiness is rejected; kind itself decides what a legal cluster
/// name is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct ClusterContext(String);

impl ClusterContext {
    /// Context used when none is given on the command line
    pub const DEFAULT: &'static str = "keitaro";

    /// Suffix kind gives to the control plane node container
    pub const CONTROL_PLANE_SUFFIX: &'static str = "-control-plane";

    /// Suffix kind gives to worker node containers (`-worker`, `-worker2`, ...)
    pub const WORKER_SUFFIX: &'static str = "-worker";

    /// Create a new `ClusterContext`
    ///
    /// # Errors
    /// Returns error if the name is empty
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidConfig {
                message: "Cluster context cannot be empty".to_string(),
            });
        }
        Ok(Self(name))
    }

    /// Get the context as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name filter matching the control plane container
    #[must_use]
    pub fn control_plane_filter(&self) -> String {
        format!("{}{}", self.0, Self::CONTROL_PLANE_SUFFIX)
    }

    /// Name filter matching the worker containers
    #[must_use]
    pub fn worker_filter(&self) -> String {
        format!("{}{}", self.0, Self::WORKER_SUFFIX)
    }
}

impl Default for ClusterContext {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for ClusterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClusterContext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClusterContext {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<ClusterContext> for String {
    fn from(ctx: ClusterContext) -> Self {
        ctx.0
    }
}

/// Opaque container identifier as reported by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct ContainerId(String);

impl ContainerId {
    /// Length of the short form Docker prints
    pub const SHORT_LENGTH: usize = 12;

    /// Create a new `ContainerId`
    ///
    /// # Errors
    /// Returns error if the ID is empty
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidConfig {
                message: "Container ID cannot be empty".to_string(),
            });
        }
        Ok(Self(id))
    }

    /// Get the container ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First twelve characters of the ID
    #[must_use]
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(Self::SHORT_LENGTH)
            .map_or(self.0.as_str(), |(idx, _)| &self.0[..idx])
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ContainerId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<ContainerId> for String {
    fn from(id: ContainerId) -> Self {
        id.0
    }
}

/// Container state as reported by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerState {
    /// Created but never started
    Created,
    /// Running
    Running,
    /// Paused
    Paused,
    /// Restarting
    Restarting,
    /// Being removed
    Removing,
    /// Exited
    Exited,
    /// Dead
    Dead,
    /// Any state string this crate does not know about
    Unknown(String),
}

impl ContainerState {
    /// State string as the runtime spells it
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Removing => "removing",
            Self::Exited => "exited",
            Self::Dead => "dead",
            Self::Unknown(state) => state,
        }
    }

    /// Whether the container is running
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl From<&str> for ContainerState {
    fn from(s: &str) -> Self {
        match s {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "exited" => Self::Exited,
            "dead" => Self::Dead,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ContainerState {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ContainerState> for String {
    fn from(state: ContainerState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a container as observed by a listing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Container ID
    pub id: ContainerId,
    /// Names, Docker style (with a leading `/`)
    pub names: Vec<String>,
    /// Observed state
    pub state: ContainerState,
}

impl ContainerRecord {
    /// Create a record
    #[must_use]
    pub const fn new(id: ContainerId, names: Vec<String>, state: ContainerState) -> Self {
        Self { id, names, state }
    }

    /// Name to show the user: the first name without Docker's leading `/`,
    /// or the short ID for an unnamed container
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|name| name.trim_start_matches('/'))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.id.short())
    }
}
