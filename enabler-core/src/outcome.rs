//! Per-container stop outcomes with structured tracing

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ClusterContext, ContainerId, ContainerRecord, ContainerState};

/// What happened to one container during a stop run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StopOutcome {
    /// The runtime accepted the stop request
    Stopped,

    /// The container was not running, so no stop was requested
    Skipped {
        /// State observed at listing time
        state: ContainerState,
    },

    /// The runtime rejected the stop request
    Failed {
        /// Error reported by the runtime
        reason: String,
    },
}

impl StopOutcome {
    /// Whether a stop request was sent for this container
    #[must_use]
    pub const fn was_requested(&self) -> bool {
        matches!(self, Self::Stopped | Self::Failed { .. })
    }
}

/// A container and the outcome of trying to stop it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopEntry {
    /// Container ID
    pub id: ContainerId,
    /// Display name
    pub name: String,
    /// Outcome
    pub outcome: StopOutcome,
}

impl StopEntry {
    /// Build an entry for `record`
    #[must_use]
    pub fn new(record: &ContainerRecord, outcome: StopOutcome) -> Self {
        Self {
            id: record.id.clone(),
            name: record.display_name().to_string(),
            outcome,
        }
    }

    /// Emit the user facing log line for this entry
    pub fn emit_trace(&self) {
        match &self.outcome {
            StopOutcome::Stopped => {
                tracing::info!(
                    container_id = %self.id,
                    event = "stopped",
                    "Container {} stopped.",
                    self.name
                );
            }
            StopOutcome::Skipped { state } => {
                tracing::info!(
                    container_id = %self.id,
                    state = %state,
                    event = "skipped",
                    "Cannot stop container {} because it is in {} status.",
                    self.name,
                    state
                );
            }
            StopOutcome::Failed { reason } => {
                tracing::error!(
                    container_id = %self.id,
                    error = %reason,
                    event = "stop_failed",
                    "Unable to stop container: {}",
                    self.name
                );
            }
        }
    }
}

impl fmt::Display for StopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            StopOutcome::Stopped => write!(f, "{} stopped", self.name),
            StopOutcome::Skipped { state } => write!(f, "{} skipped ({state})", self.name),
            StopOutcome::Failed { reason } => write!(f, "{} failed: {reason}", self.name),
        }
    }
}

/// Outcomes of one stop run, in the order the runtime listed the containers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopReport {
    context: ClusterContext,
    entries: Vec<StopEntry>,
}

impl StopReport {
    /// Create an empty report for `context`
    #[must_use]
    pub const fn new(context: ClusterContext) -> Self {
        Self {
            context,
            entries: Vec::new(),
        }
    }

    /// Append an entry
    pub fn push(&mut self, entry: StopEntry) {
        self.entries.push(entry);
    }

    /// Cluster this report is about
    #[must_use]
    pub const fn context(&self) -> &ClusterContext {
        &self.context
    }

    /// All entries in listing order
    #[must_use]
    pub fn entries(&self) -> &[StopEntry] {
        &self.entries
    }

    /// Whether no containers matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of containers stopped
    #[must_use]
    pub fn stopped(&self) -> usize {
        self.count(|o| matches!(o, StopOutcome::Stopped))
    }

    /// Number of containers skipped because they were not running
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StopOutcome::Skipped { .. }))
    }

    /// Number of containers that failed to stop
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, StopOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&StopOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, state: ContainerState) -> ContainerRecord {
        ContainerRecord::new(
            ContainerId::new(id).unwrap(),
            vec![format!("/{id}")],
            state,
        )
    }

    #[test]
    fn test_report_counts() {
        let mut report = StopReport::new(ClusterContext::default());
        report.push(StopEntry::new(
            &record("a", ContainerState::Running),
            StopOutcome::Stopped,
        ));
        report.push(StopEntry::new(
            &record("b", ContainerState::Exited),
            StopOutcome::Skipped {
                state: ContainerState::Exited,
            },
        ));
        report.push(StopEntry::new(
            &record("c", ContainerState::Running),
            StopOutcome::Failed {
                reason: "timeout".to_string(),
            },
        ));

        assert_eq!(report.stopped(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.entries()[1].name, "b");
    }

    #[test]
    fn test_was_requested() {
        assert!(StopOutcome::Stopped.was_requested());
        assert!(
            StopOutcome::Failed {
                reason: String::new()
            }
            .was_requested()
        );
        assert!(
            !StopOutcome::Skipped {
                state: ContainerState::Dead
            }
            .was_requested()
        );
    }

    #[test]
    fn test_outcome_serde() {
        let outcome = StopOutcome::Skipped {
            state: ContainerState::Exited,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert_eq!(json["state"], "exited");
    }

    #[test]
    fn test_entry_display() {
        let entry = StopEntry::new(
            &record("kind-worker", ContainerState::Paused),
            StopOutcome::Skipped {
                state: ContainerState::Paused,
            },
        );
        assert_eq!(entry.to_string(), "kind-worker skipped (paused)");
    }
}
