//! Error types for Enabler

use thiserror::Error;

use crate::config::MissingClusterPolicy;

/// Exit code used when the container runtime cannot be reached (`EX_UNAVAILABLE`)
pub const EXIT_RUNTIME_UNAVAILABLE: i32 = 69;

/// Exit code used when listing cluster containers fails (`EX_SOFTWARE`)
pub const EXIT_LIST_FAILURE: i32 = 70;

/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

/// Enabler error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The kind cluster named by the context does not exist
    #[error("Kind cluster {context} doesn't exist: {detail}")]
    ClusterNotFound {
        /// Cluster context that was looked up
        context: String,
        /// Exit code of the existence check, when it exited with one
        exit_code: Option<i32>,
        /// Human readable detail from the check
        detail: String,
    },

    /// No handle to the container runtime could be obtained
    #[error("Container runtime unavailable: {message}")]
    RuntimeUnavailable {
        /// Error message
        message: String,
    },

    /// Listing the cluster containers failed
    #[error("Failed to list containers matching {filters}: {message}")]
    ListFailure {
        /// Name filters of the listing call
        filters: String,
        /// Error message
        message: String,
    },

    /// A single container could not be stopped
    #[error("Unable to stop container {container}: {message}")]
    StopFailure {
        /// Container name or ID
        container: String,
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },
}

/// Classification of an [`Error`], independent of its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Cluster lookup failed
    NotFound,
    /// Runtime handle could not be obtained
    Unavailable,
    /// Container listing failed
    ListFailure,
    /// A container failed to stop
    StopFailure,
    /// Invalid input or configuration
    Config,
}

impl Error {
    /// Kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ClusterNotFound { .. } => ErrorKind::NotFound,
            Self::RuntimeUnavailable { .. } => ErrorKind::Unavailable,
            Self::ListFailure { .. } => ErrorKind::ListFailure,
            Self::StopFailure { .. } => ErrorKind::StopFailure,
            Self::InvalidConfig { .. } => ErrorKind::Config,
        }
    }

    /// Process exit code this error should end the command with
    ///
    /// A cluster lookup that failed with its own exit code propagates that
    /// code verbatim. A lookup failure without one follows `policy`.
    #[must_use]
    pub const fn exit_code(&self, policy: MissingClusterPolicy) -> i32 {
        match self {
            Self::ClusterNotFound {
                exit_code: Some(code),
                ..
            } => *code,
            Self::ClusterNotFound { exit_code: None, .. } => match policy {
                MissingClusterPolicy::Ignore => 0,
                MissingClusterPolicy::Fail => EXIT_FAILURE,
            },
            Self::RuntimeUnavailable { .. } => EXIT_RUNTIME_UNAVAILABLE,
            Self::ListFailure { .. } => EXIT_LIST_FAILURE,
            Self::StopFailure { .. } | Self::InvalidConfig { .. } => EXIT_FAILURE,
        }
    }
}

/// Result type alias for Enabler operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found(exit_code: Option<i32>) -> Error {
        Error::ClusterNotFound {
            context: "keitaro".to_string(),
            exit_code,
            detail: "not listed".to_string(),
        }
    }

    #[test]
    fn test_not_found_propagates_exit_code() {
        let err = not_found(Some(7));
        assert_eq!(err.exit_code(MissingClusterPolicy::Ignore), 7);
        assert_eq!(err.exit_code(MissingClusterPolicy::Fail), 7);
    }

    #[test]
    fn test_not_found_without_code_follows_policy() {
        let err = not_found(None);
        assert_eq!(err.exit_code(MissingClusterPolicy::Ignore), 0);
        assert_eq!(err.exit_code(MissingClusterPolicy::Fail), EXIT_FAILURE);
    }

    #[test]
    fn test_runtime_errors_have_distinct_codes() {
        let unavailable = Error::RuntimeUnavailable {
            message: "socket missing".to_string(),
        };
        let list = Error::ListFailure {
            filters: "keitaro-control-plane,keitaro-worker".to_string(),
            message: "network not found".to_string(),
        };

        assert_eq!(unavailable.kind(), ErrorKind::Unavailable);
        assert_eq!(list.kind(), ErrorKind::ListFailure);
        assert_eq!(
            unavailable.exit_code(MissingClusterPolicy::Ignore),
            EXIT_RUNTIME_UNAVAILABLE
        );
        assert_eq!(list.exit_code(MissingClusterPolicy::Ignore), EXIT_LIST_FAILURE);
    }

    #[test]
    fn test_stop_and_config_errors_exit_one() {
        let stop = Error::StopFailure {
            container: "keitaro-worker".to_string(),
            message: "timeout".to_string(),
        };
        let config = Error::InvalidConfig {
            message: "empty context".to_string(),
        };

        assert_eq!(stop.kind(), ErrorKind::StopFailure);
        assert_eq!(config.kind(), ErrorKind::Config);
        assert_eq!(stop.exit_code(MissingClusterPolicy::Fail), EXIT_FAILURE);
        assert_eq!(config.exit_code(MissingClusterPolicy::Ignore), EXIT_FAILURE);
    }

    #[test]
    fn test_display_names_context() {
        let msg = not_found(None).to_string();
        assert!(msg.contains("keitaro"));
    }
}
