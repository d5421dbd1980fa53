//! Test helpers.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use subtally_app::{
    context::AppContext,
    database::MockHealthCheck,
    ids::SubscriptionId,
    subscriptions::{
        MockSubscriptionsService,
        models::{Subscription, UserUuid},
    },
};

pub(crate) const TEST_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn make_subscription(id: i64) -> Subscription {
    Subscription {
        id: SubscriptionId::new(id),
        service_name: "Yandex Plus".to_string(),
        price: 400,
        user_id: UserUuid::new(),
        start_date: Timestamp::UNIX_EPOCH,
        end_date: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_health_mock() -> MockHealthCheck {
    let mut health = MockHealthCheck::new();

    health.expect_ping().never();

    health
}

pub(crate) fn service_with(
    subscriptions: MockSubscriptionsService,
    health: MockHealthCheck,
    route: Router,
) -> Service {
    let app = AppContext {
        subscriptions: Arc::new(subscriptions),
        health: Arc::new(health),
    };

    Service::new(
        Router::new()
            .hoop(inject(Arc::new(crate::state::State::new(
                app,
                TEST_REQUEST_TIMEOUT,
            ))))
            .push(route),
    )
}

pub(crate) fn subscriptions_service(subscriptions: MockSubscriptionsService, route: Router) -> Service {
    service_with(subscriptions, strict_health_mock(), route)
}
