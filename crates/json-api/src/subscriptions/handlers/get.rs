//! Get Subscription Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use subtally_app::ids::SubscriptionId;

use crate::{
    extensions::*,
    subscriptions::{errors::into_status_error, models::SubscriptionResponse},
};

/// Get Subscription Handler
///
/// Returns a subscription.
#[endpoint(
    tags("subscriptions"),
    summary = "Get Subscription",
    responses(
        (status_code = StatusCode::OK, description = "Subscription found"),
        (status_code = StatusCode::NOT_FOUND, description = "Subscription not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<SubscriptionResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let subscription = state
        .app
        .subscriptions
        .get_subscription(&state.cancellation(), SubscriptionId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(subscription.into()))
}
