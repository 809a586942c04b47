//! Stop command configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ClusterContext;

/// What to do when the cluster lookup fails without an exit code of its own
///
/// Only consulted when mapping an error to the process exit code, see
/// [`Error::exit_code`](crate::Error::exit_code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingClusterPolicy {
    /// Log the missing cluster and exit 0
    #[default]
    Ignore,
    /// Log the missing cluster and exit non-zero
    Fail,
}

/// Configuration for stopping a kind cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopConfig {
    /// Cluster to stop
    pub context: ClusterContext,

    /// Grace period handed to the runtime for each container
    #[serde(with = "duration_serde")]
    pub stop_timeout: Duration,

    /// `kind` executable used for the cluster lookup
    pub kind_binary: String,
}

impl StopConfig {
    /// Default per-container stop timeout
    pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default `kind` executable, resolved through `PATH`
    pub const DEFAULT_KIND_BINARY: &'static str = "kind";

    /// Create a configuration for `context` with default settings
    #[must_use]
    pub fn new(context: ClusterContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Set the per-container stop timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    /// Set the `kind` executable
    #[must_use]
    pub fn with_kind_binary(mut self, binary: impl Into<String>) -> Self {
        self.kind_binary = binary.into();
        self
    }
}

impl Default for StopConfig {
    fn default() -> Self {
        Self {
            context: ClusterContext::default(),
            stop_timeout: Self::DEFAULT_STOP_TIMEOUT,
            kind_binary: Self::DEFAULT_KIND_BINARY.to_string(),
        }
    }
}

// Durations travel as milliseconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StopConfig::default();
        assert_eq!(config.context.as_str(), "keitaro");
        assert_eq!(config.stop_timeout, Duration::from_millis(5000));
        assert_eq!(config.kind_binary, "kind");
    }

    #[test]
    fn test_builder() {
        let config = StopConfig::new(ClusterContext::new("dev").unwrap())
            .with_timeout(Duration::from_secs(10))
            .with_kind_binary("/opt/kind");

        assert_eq!(config.context.as_str(), "dev");
        assert_eq!(config.stop_timeout, Duration::from_secs(10));
        assert_eq!(config.kind_binary, "/opt/kind");
    }

    #[test]
    fn test_serde_uses_millis() {
        let json = serde_json::to_value(StopConfig::default()).unwrap();
        assert_eq!(json["stop_timeout"], 5000);

        let config: StopConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config, StopConfig::default());
    }

    #[test]
    fn test_config_carries_no_exit_policy() {
        let json = serde_json::to_value(StopConfig::default()).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["context", "kind_binary", "stop_timeout"]);
    }

    #[test]
    fn test_huge_timeout_serializes_saturated() {
        let config = StopConfig::default().with_timeout(Duration::MAX);
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["stop_timeout"], u64::MAX);
    }

    #[test]
    fn test_policy_serde() {
        assert_eq!(
            serde_json::to_value(MissingClusterPolicy::Fail).unwrap(),
            "fail"
        );
        assert_eq!(MissingClusterPolicy::default(), MissingClusterPolicy::Ignore);
    }
}
