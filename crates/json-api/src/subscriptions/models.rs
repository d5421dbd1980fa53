//! Subscription response models

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use subtally_app::subscriptions::models::Subscription;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionResponse {
    /// The identifier of the subscription
    pub id: i64,

    pub service_name: String,

    /// Price in minor currency units
    pub price: u64,

    pub user_id: Uuid,

    /// RFC 3339 instant the subscription starts
    pub start_date: String,

    /// RFC 3339 instant the subscription ends, absent while open-ended
    pub end_date: Option<String>,

    pub created_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        SubscriptionResponse {
            id: subscription.id.get(),
            service_name: subscription.service_name,
            price: subscription.price,
            user_id: subscription.user_id.into_uuid(),
            start_date: subscription.start_date.to_string(),
            end_date: subscription.end_date.as_ref().map(ToString::to_string),
            created_at: subscription.created_at.to_string(),
        }
    }
}
