//! Host lifecycle management.
//!
//! Listeners registered with the host start in priority order once the host
//! is up and stop in reverse order when it goes down. Stopping is bounded by
//! a per-listener timeout.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::timeout;
use tracing::{error, info, warn};

use wsboot_protocols::LifecycleError;

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

/// Host state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HostState {
    /// Initial state, not started.
    Created = 0,
    /// Starting up.
    Starting = 1,
    /// Running and ready.
    Running = 2,
    /// Shutting down.
    ShuttingDown = 3,
    /// Stopped.
    Stopped = 4,
}

impl From<u8> for HostState {
    fn from(v: u8) -> Self {
        match v {
            0 => HostState::Created,
            1 => HostState::Starting,
            2 => HostState::Running,
            3 => HostState::ShuttingDown,
            4 => HostState::Stopped,
            _ => HostState::Created,
        }
    }
}

/// A listener on the host lifecycle.
#[async_trait::async_trait]
pub trait LifecycleHook: Send + Sync {
    /// Called once the host starts.
    async fn on_start(&self) -> Result<(), LifecycleError>;

    /// Called when the host stops.
    async fn on_stop(&self) -> Result<(), LifecycleError>;

    /// Priority for startup/shutdown ordering (higher = earlier start, later stop).
    fn priority(&self) -> i32 {
        priority::DEFAULT
    }

    /// Name used in log lines.
    fn name(&self) -> &str {
        "listener"
    }
}

/// Runs [`LifecycleHook`]s through the host state machine.
pub struct LifecycleManager {
    state: AtomicU8,
    hooks: RwLock<Vec<Arc<dyn LifecycleHook>>>,
    shutdown_timeout: RwLock<Duration>,
}

impl LifecycleManager {
    pub fn new(shutdown_timeout: Duration) -> Self {
        Self {
            state: AtomicU8::new(HostState::Created as u8),
            hooks: RwLock::new(Vec::new()),
            shutdown_timeout: RwLock::new(shutdown_timeout),
        }
    }

    pub fn state(&self) -> HostState {
        HostState::from(self.state.load(Ordering::SeqCst))
    }

    /// Register a hook, keeping hooks sorted by descending priority.
    ///
    /// Hooks with equal priority keep their registration order.
    pub fn register_hook(&self, hook: Arc<dyn LifecycleHook>) {
        let mut hooks = self.hooks.write();
        hooks.push(hook);
        hooks.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.read().len()
    }

    pub fn shutdown_timeout(&self) -> Duration {
        *self.shutdown_timeout.read()
    }

    /// Change the per-hook stop timeout; registered hooks are kept.
    pub fn set_shutdown_timeout(&self, shutdown_timeout: Duration) {
        *self.shutdown_timeout.write() = shutdown_timeout;
    }

    fn snapshot(&self) -> Vec<Arc<dyn LifecycleHook>> {
        self.hooks.read().clone()
    }

    /// Start every hook.
    ///
    /// On the first failure the hooks already started are stopped again in
    /// reverse order and the manager ends in [`HostState::Stopped`].
    pub async fn start(&self) -> Result<(), LifecycleError> {
        let current = self.state();
        if self
            .state
            .compare_exchange(
                HostState::Created as u8,
                HostState::Starting as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_err()
        {
            return Err(LifecycleError::InvalidState {
                action: "start",
                state: format!("{:?}", current),
            });
        }

        info!("Host starting...");

        let hooks = self.snapshot();
        for (i, hook) in hooks.iter().enumerate() {
            if let Err(e) = hook.on_start().await {
                error!("Failed to start {}: {}", hook.name(), e);
                for started in hooks.iter().take(i).rev() {
                    if let Err(e) = started.on_stop().await {
                        warn!("Rollback of {} failed: {}", started.name(), e);
                    }
                }
                self.state.store(HostState::Stopped as u8, Ordering::SeqCst);
                return Err(e);
            }
        }

        self.state.store(HostState::Running as u8, Ordering::SeqCst);
        info!("Host started with {} listeners", hooks.len());
        Ok(())
    }

    /// Stop every hook in reverse order.
    ///
    /// All hooks are given the chance to stop even when some fail or time out.
    pub async fn stop(&self) -> Result<(), LifecycleError> {
        let current = self.state();
        if self
            .state
            .compare_exchange(
                HostState::Running as u8,
                HostState::ShuttingDown as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_err()
        {
            return Err(LifecycleError::InvalidState {
                action: "stop",
                state: format!("{:?}", current),
            });
        }

        info!("Host shutting down...");

        let hooks = self.snapshot();
        let shutdown_timeout = self.shutdown_timeout();
        let mut failures = 0;

        for hook in hooks.iter().rev() {
            match timeout(shutdown_timeout, hook.on_stop()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!("{} failed to stop: {}", hook.name(), e);
                    failures += 1;
                }
                Err(_) => {
                    warn!("{} failed to stop: {}", hook.name(), LifecycleError::Timeout);
                    failures += 1;
                }
            }
        }

        self.state.store(HostState::Stopped as u8, Ordering::SeqCst);
        info!("Host stopped");

        if failures == 0 {
            Ok(())
        } else {
            Err(LifecycleError::ShutdownIncomplete(failures))
        }
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Priority levels for lifecycle listeners (higher = starts earlier, stops later).
pub mod priority {
    pub const CONTAINER: i32 = 500;
    pub const DEFAULT: i32 = 0;
}
