//! Docker Engine implementation of the container runtime

use async_trait::async_trait;
use bollard::Docker;
use bollard::container::{ListContainersOptions, StopContainerOptions};
use bollard::models::ContainerSummary;
use enabler_core::{ContainerId, ContainerRecord, ContainerState, Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::runtime::{ContainerRuntime, ListOptions, RuntimeConnector};

/// Connects to the local Docker daemon
///
/// Honours `DOCKER_HOST`, falling back to the platform's default socket.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerConnector;

impl DockerConnector {
    /// Create a connector
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RuntimeConnector for DockerConnector {
    async fn connect(&self) -> Result<Arc<dyn ContainerRuntime>> {
        debug!("Connecting to Docker with local defaults");

        let docker =
            Docker::connect_with_local_defaults().map_err(|e| Error::RuntimeUnavailable {
                message: e.to_string(),
            })?;

        Ok(Arc::new(DockerRuntime::new(docker)))
    }
}

/// Container runtime backed by the Docker Engine API
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(docker: Docker) -> Self {
        Self { docker }
    }
}

/// Convert a listing entry, dropping entries without an ID
fn to_record(summary: ContainerSummary) -> Option<ContainerRecord> {
    let Some(id) = summary.id.and_then(|id| ContainerId::new(id).ok()) else {
        warn!(names = ?summary.names, "Ignoring container without an ID");
        return None;
    };

    let state = summary
        .state
        .map_or_else(|| ContainerState::Unknown("unknown".to_string()), ContainerState::from);

    Some(ContainerRecord::new(
        id,
        summary.names.unwrap_or_default(),
        state,
    ))
}

/// Docker takes the grace period in whole seconds
fn timeout_secs(timeout: Duration) -> i64 {
    i64::try_from(timeout.as_secs()).unwrap_or(i64::MAX)
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn list(&self, options: &ListOptions) -> Result<Vec<ContainerRecord>> {
        debug!(all = options.all, names = ?options.names, "Listing containers");

        let query = ListContainersOptions::<String> {
            all: options.all,
            filters: options.filters(),
            ..Default::default()
        };

        let summaries = self
            .docker
            .list_containers(Some(query))
            .await
            .map_err(|e| Error::ListFailure {
                filters: options.names.join(","),
                message: e.to_string(),
            })?;

        Ok(summaries.into_iter().filter_map(to_record).collect())
    }

    async fn stop(&self, id: &ContainerId, timeout: Duration) -> Result<()> {
        debug!(container_id = %id, timeout_secs = timeout.as_secs(), "Stopping container");

        self.docker
            .stop_container(
                id.as_str(),
                Some(StopContainerOptions {
                    t: timeout_secs(timeout),
                }),
            )
            .await
            .map_err(|e| Error::StopFailure {
                container: id.to_string(),
                message: e.to_string(),
            })
    }
}
