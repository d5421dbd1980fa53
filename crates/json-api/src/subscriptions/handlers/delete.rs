//! Delete Subscription Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use subtally_app::ids::SubscriptionId;

use crate::{extensions::*, subscriptions::errors::into_status_error};

/// Delete Subscription Handler
#[endpoint(
    tags("subscriptions"),
    summary = "Delete Subscription",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Subscription deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Subscription not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(id: PathParam<i64>, depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let id = SubscriptionId::new(id.into_inner());

    state
        .app
        .subscriptions
        .delete_subscription(&state.cancellation(), id)
        .await
        .map_err(into_status_error)?;

    info!(subscription_id = %id, "deleted subscription");

    Ok(StatusCode::NO_CONTENT)
}
