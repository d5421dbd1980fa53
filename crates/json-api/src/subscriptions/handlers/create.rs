//! Create Subscription Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use subtally_app::subscriptions::models::NewSubscription;

use crate::{extensions::*, subscriptions::errors::into_status_error};

/// Create Subscription Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateSubscriptionRequest {
    pub service_name: String,

    /// Price in minor currency units
    pub price: u64,

    pub user_id: Uuid,

    /// RFC 3339 instant
    pub start_date: String,

    /// RFC 3339 instant; omit for an open-ended subscription
    #[serde(default)]
    pub end_date: Option<String>,
}

impl TryFrom<CreateSubscriptionRequest> for NewSubscription {
    type Error = StatusError;

    fn try_from(request: CreateSubscriptionRequest) -> Result<Self, Self::Error> {
        if request.service_name.trim().is_empty() {
            return Err(StatusError::bad_request().brief("service_name must not be blank"));
        }

        let subscription = NewSubscription {
            service_name: request.service_name,
            price: request.price.checked_price("price")?,
            user_id: request.user_id.into(),
            start_date: request.start_date.parse_timestamp("start_date")?,
            end_date: request
                .end_date
                .as_deref()
                .map(|end_date| end_date.parse_timestamp("end_date"))
                .transpose()?,
        };

        if !subscription.has_valid_interval() {
            return Err(StatusError::bad_request().brief("end_date must not be before start_date"));
        }

        Ok(subscription)
    }
}

/// Subscription Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionCreatedResponse {
    /// Created subscription id
    pub id: i64,
}

/// Create Subscription Handler
#[endpoint(
    tags("subscriptions"),
    summary = "Create Subscription",
    responses(
        (status_code = StatusCode::CREATED, description = "Subscription created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSubscriptionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubscriptionCreatedResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let subscription = NewSubscription::try_from(json.into_inner())?;

    let id = state
        .app
        .subscriptions
        .store_subscription(&state.cancellation(), subscription)
        .await
        .map_err(into_status_error)?
        .id;

    res.add_header(LOCATION, format!("/v1/subscriptions/{id}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(subscription_id = %id, "created subscription");

    Ok(Json(SubscriptionCreatedResponse { id: id.get() }))
}
