//! Update Subscription Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use uuid::Uuid;

use subtally_app::{ids::SubscriptionId, subscriptions::models::SubscriptionPatch};

use crate::{
    extensions::*,
    subscriptions::{errors::into_status_error, models::SubscriptionResponse},
};

/// Update Subscription Request
///
/// Absent fields are left unchanged. An explicit `"end_date": null` makes the
/// subscription open-ended.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateSubscriptionRequest {
    #[serde(default)]
    pub service_name: Option<String>,

    #[serde(default)]
    pub price: Option<u64>,

    #[serde(default)]
    pub user_id: Option<Uuid>,

    /// RFC 3339 instant
    #[serde(default)]
    pub start_date: Option<String>,

    /// RFC 3339 instant, or `null` to clear
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Option<String>>,
}

/// Distinguish a present `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TryFrom<UpdateSubscriptionRequest> for SubscriptionPatch {
    type Error = StatusError;

    fn try_from(request: UpdateSubscriptionRequest) -> Result<Self, Self::Error> {
        if request
            .service_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(StatusError::bad_request().brief("service_name must not be blank"));
        }

        Ok(SubscriptionPatch {
            service_name: request.service_name,
            price: request
                .price
                .map(|price| price.checked_price("price"))
                .transpose()?,
            user_id: request.user_id.map(Into::into),
            start_date: request
                .start_date
                .as_deref()
                .map(|start_date| start_date.parse_timestamp("start_date"))
                .transpose()?,
            end_date: request
                .end_date
                .map(|end_date| {
                    end_date
                        .as_deref()
                        .map(|end_date| end_date.parse_timestamp("end_date"))
                        .transpose()
                })
                .transpose()?,
        })
    }
}

/// Subscription Update Handler
///
/// Merges the request into the stored subscription and writes it back.
#[endpoint(
    tags("subscriptions"),
    summary = "Update Subscription",
    responses(
        (status_code = StatusCode::OK, description = "Subscription updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Subscription not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    json: JsonBody<UpdateSubscriptionRequest>,
    depot: &mut Depot,
) -> Result<Json<SubscriptionResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let id = SubscriptionId::new(id.into_inner());
    let patch = SubscriptionPatch::try_from(json.into_inner())?;
    let cx = state.cancellation();

    let mut subscription = state
        .app
        .subscriptions
        .get_subscription(&cx, id)
        .await
        .map_err(into_status_error)?;

    patch.apply_to(&mut subscription);

    if !subscription.has_valid_interval() {
        return Err(StatusError::bad_request().brief("end_date must not be before start_date"));
    }

    let updated = state
        .app
        .subscriptions
        .update_subscription(&cx, subscription)
        .await
        .map_err(into_status_error)?;

    info!(subscription_id = %id, "updated subscription");

    Ok(Json(updated.into()))
}
