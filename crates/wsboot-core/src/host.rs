//! Host container context.

use std::sync::Arc;
use std::time::Duration;

use wsboot_protocols::LifecycleError;

use crate::lifecycle::{HostState, LifecycleHook, LifecycleManager};

/// The host the endpoints are deployed into.
///
/// Carries the context path every endpoint is published under and the
/// lifecycle listeners the host notifies on start and stop.
pub struct HostContext {
    context_path: String,
    lifecycle: Arc<LifecycleManager>,
}

impl HostContext {
    /// Create a host context.
    ///
    /// A trailing `/` is dropped from the context path.
    pub fn new(context_path: impl Into<String>) -> Self {
        let context_path = context_path.into();
        Self {
            context_path: context_path.trim_end_matches('/').to_string(),
            lifecycle: Arc::new(LifecycleManager::default()),
        }
    }

    /// Host served at the root context.
    pub fn root() -> Self {
        Self::new("")
    }

    /// Set the per-listener shutdown timeout. Listeners already added stay.
    pub fn with_shutdown_timeout(self, shutdown_timeout: Duration) -> Self {
        self.lifecycle.set_shutdown_timeout(shutdown_timeout);
        self
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    /// Register a lifecycle listener.
    pub fn add_listener(&self, listener: Arc<dyn LifecycleHook>) {
        tracing::debug!("Adding lifecycle listener {}", listener.name());
        self.lifecycle.register_hook(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.lifecycle.hook_count()
    }

    pub fn lifecycle(&self) -> &Arc<LifecycleManager> {
        &self.lifecycle
    }

    pub fn state(&self) -> HostState {
        self.lifecycle.state()
    }

    /// Start the host, notifying every listener.
    pub async fn start(&self) -> Result<(), LifecycleError> {
        self.lifecycle.start().await
    }

    /// Stop the host, notifying every listener in reverse order.
    pub async fn stop(&self) -> Result<(), LifecycleError> {
        self.lifecycle.stop().await
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingListener {
        starts: AtomicUsize,
        stops: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl LifecycleHook for CountingListener {
        async fn on_start(&self) -> Result<(), LifecycleError> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn on_stop(&self) -> Result<(), LifecycleError> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_context_path_trimmed() {
        assert_eq!(HostContext::new("/chat/").context_path(), "/chat");
        assert_eq!(HostContext::new("/").context_path(), "");
        assert_eq!(HostContext::root().context_path(), "");
    }

    #[test]
    fn test_new_host_is_created() {
        let host = HostContext::default();
        assert_eq!(host.state(), HostState::Created);
        assert_eq!(host.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_listeners_notified() {
        let host = HostContext::new("/chat").with_shutdown_timeout(Duration::from_secs(1));
        let listener = Arc::new(CountingListener {
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        });
        host.add_listener(listener.clone());
        assert_eq!(host.listener_count(), 1);

        host.start().await.unwrap();
        assert_eq!(host.state(), HostState::Running);
        host.stop().await.unwrap();
        assert_eq!(host.state(), HostState::Stopped);

        assert_eq!(listener.starts.load(Ordering::SeqCst), 1);
        assert_eq!(listener.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_timeout_keeps_listeners() {
        let host = HostContext::new("/chat");
        let listener = Arc::new(CountingListener {
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        });
        host.add_listener(listener.clone());

        let host = host.with_shutdown_timeout(Duration::from_secs(1));
        assert_eq!(host.listener_count(), 1);
        assert_eq!(host.lifecycle().shutdown_timeout(), Duration::from_secs(1));

        host.start().await.unwrap();
        host.stop().await.unwrap();
        assert_eq!(listener.stops.load(Ordering::SeqCst), 1);
    }
}
