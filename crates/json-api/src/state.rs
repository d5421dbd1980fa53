//! State

use std::{sync::Arc, time::Duration};

use subtally_app::{cancellation::Cancellation, context::AppContext};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    request_timeout: Duration,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, request_timeout: Duration) -> Self {
        Self {
            app,
            request_timeout,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, request_timeout: Duration) -> Arc<Self> {
        Arc::new(Self::new(app, request_timeout))
    }

    /// Cancellation for one request's store calls, bounded by the configured
    /// request timeout.
    #[must_use]
    pub(crate) fn cancellation(&self) -> Cancellation {
        Cancellation::new().with_timeout(self.request_timeout)
    }
}
