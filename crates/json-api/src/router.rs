//! App Router

use salvo::Router;

use crate::{healthcheck, subscriptions};

/// Versioned API routes.
pub fn api_router() -> Router {
    Router::with_path("v1").push(
        Router::with_path("subscriptions")
            .get(subscriptions::index::handler)
            .post(subscriptions::create::handler)
            .push(Router::with_path("total-cost").get(subscriptions::total_cost::handler))
            .push(
                Router::with_path("{id}")
                    .get(subscriptions::get::handler)
                    .put(subscriptions::update::handler)
                    .delete(subscriptions::delete::handler),
            ),
    )
}

/// Liveness and readiness probes.
pub fn health_router() -> Router {
    Router::new()
        .push(Router::with_path("healthz").get(healthcheck::live))
        .push(Router::with_path("readyz").get(healthcheck::ready))
}
