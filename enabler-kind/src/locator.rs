//! Kind cluster lookup

use async_trait::async_trait;
use enabler_core::{ClusterContext, Error, Result};
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::debug;

/// Verifies that a kind cluster exists
#[async_trait]
pub trait ClusterLocator: Send + Sync {
    /// Check that the cluster named by `context` exists
    ///
    /// # Errors
    /// Returns [`Error::ClusterNotFound`], carrying the exit code of the
    /// underlying check when it exited with one
    async fn locate(&self, context: &ClusterContext) -> Result<()>;
}

/// Looks clusters up with `kind get clusters`
#[derive(Debug, Clone)]
pub struct KindLocator {
    binary: String,
}

impl KindLocator {
    /// Create a locator using the given `kind` executable
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for KindLocator {
    fn default() -> Self {
        Self::new(enabler_core::StopConfig::DEFAULT_KIND_BINARY)
    }
}

/// Whether `kind get clusters` output lists `context`
fn is_listed(stdout: &str, context: &ClusterContext) -> bool {
    stdout.lines().any(|line| line.trim() == context.as_str())
}

#[async_trait]
impl ClusterLocator for KindLocator {
    async fn locate(&self, context: &ClusterContext) -> Result<()> {
        debug!("Running: `{} get clusters`", self.binary);

        let output = Command::new(&self.binary)
            .args(["get", "clusters"])
            .output()
            .await
            .map_err(|e| Error::ClusterNotFound {
                context: context.to_string(),
                exit_code: None,
                detail: format!("failed to run {}: {e}", self.binary),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ClusterNotFound {
                context: context.to_string(),
                // None when kind was killed by a signal
                exit_code: output.status.code(),
                detail: if stderr.is_empty() {
                    format!("{} exited with {}", self.binary, output.status)
                } else {
                    stderr
                },
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if is_listed(&stdout, context) {
            debug!(kube_context = %context, "Kind cluster found");
            Ok(())
        } else {
            Err(Error::ClusterNotFound {
                context: context.to_string(),
                exit_code: None,
                detail: "not listed by `kind get clusters`".to_string(),
            })
        }
    }
}

/// Scripted locator for testing
#[derive(Debug, Clone, Default)]
pub struct MockLocator {
    state: Arc<Mutex<MockLocatorState>>,
}

#[derive(Debug, Default)]
struct MockLocatorState {
    missing: bool,
    exit_code: Option<i32>,
    calls: usize,
}

impl MockLocator {
    /// A locator that finds every cluster
    #[must_use]
    pub fn found() -> Self {
        Self::default()
    }

    /// A locator that finds no cluster, failing with `exit_code` if given
    #[must_use]
    pub fn missing(exit_code: Option<i32>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockLocatorState {
                missing: true,
                exit_code,
                calls: 0,
            })),
        }
    }

    /// Number of lookups made (for testing)
    pub async fn calls(&self) -> usize {
        self.state.lock().await.calls
    }
}

#[async_trait]
impl ClusterLocator for MockLocator {
    async fn locate(&self, context: &ClusterContext) -> Result<()> {
        let mut state = self.state.lock().await;
        state.calls += 1;

        if state.missing {
            return Err(Error::ClusterNotFound {
                context: context.to_string(),
                exit_code: state.exit_code,
                detail: "Mock: cluster missing".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_listed_matches_whole_lines() {
        let ctx = ClusterContext::new("dev").unwrap();
        assert!(is_listed("kind\ndev\n", &ctx));
        assert!(is_listed("dev\r\n", &ctx));
        assert!(!is_listed("development\ndev-2\n", &ctx));
        assert!(!is_listed("", &ctx));
    }

    #[tokio::test]
    async fn test_missing_binary_has_no_exit_code() {
        let locator = KindLocator::new("/nonexistent/enabler-test-kind");
        let err = locator.locate(&ClusterContext::default()).await.unwrap_err();

        match err {
            Error::ClusterNotFound {
                exit_code, detail, ..
            } => {
                assert_eq!(exit_code, None);
                assert!(detail.contains("failed to run"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_mock_locator() {
        let ctx = ClusterContext::default();

        let found = MockLocator::found();
        assert!(found.locate(&ctx).await.is_ok());

        let missing = MockLocator::missing(Some(7));
        let err = missing.locate(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ClusterNotFound {
                exit_code: Some(7),
                ..
            }
        ));
        assert_eq!(missing.calls().await, 1);
    }
}
