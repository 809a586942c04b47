//! Container runtime traits for pluggable implementations

use async_trait::async_trait;
use enabler_core::{ClusterContext, ContainerId, ContainerRecord, ContainerState, Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Parameters of a container listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Include containers that are not running
    pub all: bool,
    /// Name filters, matched with OR semantics by the runtime
    pub names: Vec<String>,
}

impl ListOptions {
    /// Options matching every node container of a kind cluster, running or not
    #[must_use]
    pub fn for_cluster(context: &ClusterContext) -> Self {
        Self {
            all: true,
            names: vec![context.control_plane_filter(), context.worker_filter()],
        }
    }

    /// Filters in the shape the Docker API expects
    #[must_use]
    pub fn filters(&self) -> HashMap<String, Vec<String>> {
        let mut filters = HashMap::new();
        if !self.names.is_empty() {
            filters.insert("name".to_string(), self.names.clone());
        }
        filters
    }
}

/// Trait for container runtimes
///
/// This allows for different implementations:
/// - [`DockerRuntime`](crate::DockerRuntime) - Docker Engine API
/// - [`MockRuntime`] - Testing without a daemon
///
/// # Thread Safety
/// All implementations must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// List containers matching `options`, in the order the runtime returns them
    ///
    /// # Errors
    /// Returns [`Error::ListFailure`] if the listing call fails
    async fn list(&self, options: &ListOptions) -> Result<Vec<ContainerRecord>>;

    /// Ask the runtime to stop a container, killing it after `timeout`
    ///
    /// # Errors
    /// Returns [`Error::StopFailure`] if the runtime rejects the request
    async fn stop(&self, id: &ContainerId, timeout: Duration) -> Result<()>;
}

/// Obtains a handle to a container runtime
#[async_trait]
pub trait RuntimeConnector: Send + Sync {
    /// Connect to the runtime
    ///
    /// # Errors
    /// Returns [`Error::RuntimeUnavailable`] if no handle can be obtained
    async fn connect(&self) -> Result<Arc<dyn ContainerRuntime>>;
}

/// Mock runtime for testing (doesn't talk to a daemon)
///
/// Acts as its own connector. Stopping a container flips its stored state
/// to `exited`, so a second listing observes the change.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use enabler_core::{ContainerId, ContainerRecord, ContainerState};
/// use enabler_kind::{ContainerRuntime, ListOptions, MockRuntime};
///
/// # tokio_test::block_on(async {
/// let id = ContainerId::new("abc").unwrap();
/// let runtime = MockRuntime::new(vec![ContainerRecord::new(
///     id.clone(),
///     vec!["/keitaro-control-plane".to_string()],
///     ContainerState::Running,
/// )]);
///
/// runtime.stop(&id, Duration::from_secs(5)).await.unwrap();
/// assert_eq!(runtime.stop_calls().await.len(), 1);
/// # });
/// ```
#[derive(Clone)]
pub struct MockRuntime {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    containers: Vec<ContainerRecord>,
    failing_stops: HashSet<ContainerId>,
    fail_connect: bool,
    fail_list: bool,
    connect_calls: usize,
    list_calls: Vec<ListOptions>,
    stop_calls: Vec<(ContainerId, Duration)>,
}

impl MockRuntime {
    /// Create a mock runtime holding `containers`
    #[must_use]
    pub fn new(containers: Vec<ContainerRecord>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                containers,
                ..MockState::default()
            })),
        }
    }

    /// Make `connect` fail
    pub async fn set_fail_connect(&self, fail: bool) {
        self.state.lock().await.fail_connect = fail;
    }

    /// Make `list` fail
    pub async fn set_fail_list(&self, fail: bool) {
        self.state.lock().await.fail_list = fail;
    }

    /// Make `stop` fail for `id`
    pub async fn fail_stop_for(&self, id: ContainerId) {
        self.state.lock().await.failing_stops.insert(id);
    }

    /// Number of `connect` calls made (for testing)
    pub async fn connect_calls(&self) -> usize {
        self.state.lock().await.connect_calls
    }

    /// Options of every `list` call made (for testing)
    pub async fn list_calls(&self) -> Vec<ListOptions> {
        self.state.lock().await.list_calls.clone()
    }

    /// ID and timeout of every `stop` call made, in order (for testing)
    pub async fn stop_calls(&self) -> Vec<(ContainerId, Duration)> {
        self.state.lock().await.stop_calls.clone()
    }

    /// Current state of a stored container (for testing)
    pub async fn state_of(&self, id: &ContainerId) -> Option<ContainerState> {
        self.state
            .lock()
            .await
            .containers
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.state.clone())
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for MockRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRuntime").finish_non_exhaustive()
    }
}

/// Docker's name filter is an unanchored match
fn name_matches(record: &ContainerRecord, filters: &[String]) -> bool {
    filters.is_empty()
        || record
            .names
            .iter()
            .any(|name| filters.iter().any(|f| name.contains(f.as_str())))
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    async fn list(&self, options: &ListOptions) -> Result<Vec<ContainerRecord>> {
        let mut state = self.state.lock().await;
        state.list_calls.push(options.clone());

        if state.fail_list {
            return Err(Error::ListFailure {
                filters: options.names.join(","),
                message: "Mock: network not found".to_string(),
            });
        }

        let containers: Vec<ContainerRecord> = state
            .containers
            .iter()
            .filter(|c| options.all || c.state.is_running())
            .filter(|c| name_matches(c, &options.names))
            .cloned()
            .collect();

        tracing::debug!(matched = containers.len(), "Mock: Listed containers");

        Ok(containers)
    }

    async fn stop(&self, id: &ContainerId, timeout: Duration) -> Result<()> {
        let mut state = self.state.lock().await;
        state.stop_calls.push((id.clone(), timeout));

        if state.failing_stops.contains(id) {
            return Err(Error::StopFailure {
                container: id.to_string(),
                message: "Mock: stop rejected".to_string(),
            });
        }

        if let Some(container) = state.containers.iter_mut().find(|c| &c.id == id) {
            container.state = ContainerState::Exited;
        }

        tracing::debug!(
            container_id = %id,
            timeout_ms = timeout.as_millis(),
            "Mock: Stopped container"
        );

        Ok(())
    }
}

#[async_trait]
impl RuntimeConnector for MockRuntime {
    async fn connect(&self) -> Result<Arc<dyn ContainerRuntime>> {
        let mut state = self.state.lock().await;
        state.connect_calls += 1;

        if state.fail_connect {
            return Err(Error::RuntimeUnavailable {
                message: "Mock: no daemon".to_string(),
            });
        }

        Ok(Arc::new(self.clone()))
    }
}
