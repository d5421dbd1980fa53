//! Test Helpers

use crate::subscriptions::models::{NewSubscription, UserUuid};

/// Open-ended subscription starting at the given RFC 3339 instant.
pub(crate) fn new_subscription(
    service_name: &str,
    price: u64,
    user_id: UserUuid,
    start_date: &str,
) -> NewSubscription {
    NewSubscription {
        service_name: service_name.to_string(),
        price,
        user_id,
        start_date: start_date.parse().expect("valid RFC 3339 timestamp"),
        end_date: None,
    }
}
