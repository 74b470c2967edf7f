use std::sync::Arc;
use std::time::Duration;

use services::BackendClient;

pub trait UiApp: Send + Sync {
    fn backend(&self) -> Arc<BackendClient>;

    /// How long the processing panel lingers at 100% before the download
    /// panel swaps in. Zero disables the hold.
    fn complete_hold(&self) -> Duration;
}

#[derive(Clone)]
pub struct AppContext {
    backend: Arc<BackendClient>,
    complete_hold: Duration,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            backend: app.backend(),
            complete_hold: app.complete_hold(),
        }
    }

    #[must_use]
    pub fn backend(&self) -> Arc<BackendClient> {
        Arc::clone(&self.backend)
    }

    #[must_use]
    pub fn complete_hold(&self) -> Duration {
        self.complete_hold
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
