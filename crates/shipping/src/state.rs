//! Application state shared by all request handlers.
//!
//! The active store is chosen by the entry point and injected here; handlers
//! only see the [`PackageRepository`] trait object.

use std::{sync::Arc, time::Duration};

use shipping_core::service::ServiceInfo;
use shipping_core::storage::PackageRepository;

/// Default time budget for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state.
///
/// Cloned for each request handler. The repository (and any connection pool
/// behind it) is created once at startup and released through
/// [`AppState::shutdown`].
#[derive(Clone)]
pub struct AppState {
    /// Active package store.
    pub packages: Arc<dyn PackageRepository>,
    /// Metadata served by `/discovery` and echoed in error bodies.
    pub service: Arc<ServiceInfo>,
    /// Requests running longer than this are answered with 408.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates state around the given store.
    pub fn new(packages: Arc<dyn PackageRepository>) -> Self {
        Self {
            packages,
            service: Arc::new(ServiceInfo::default()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_service_info(mut self, service: ServiceInfo) -> Self {
        self.service = Arc::new(service);
        self
    }

    /// Releases the store's resources once the server has stopped.
    pub async fn shutdown(&self) {
        self.packages.close().await;
        tracing::info!("Package store closed");
    }
}
