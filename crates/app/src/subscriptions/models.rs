//! Subscription Models

use jiff::Timestamp;

use crate::ids::{SubscriptionId, TypedUuid};

/// Marker for user-owned identifiers.
#[derive(Debug)]
pub struct User;

/// Owning user UUID
pub type UserUuid = TypedUuid<User>;

/// Subscription Model
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    /// Store-assigned identifier.
    pub id: SubscriptionId,

    /// Free-text label of the subscribed service.
    pub service_name: String,

    /// Price in minor currency units.
    pub price: u64,

    /// User owning the subscription.
    pub user_id: UserUuid,

    /// Instant the subscription becomes active.
    pub start_date: Timestamp,

    /// Instant the subscription ends; `None` while it is open-ended.
    pub end_date: Option<Timestamp>,

    /// Store-assigned creation timestamp.
    pub created_at: Timestamp,
}

impl Subscription {
    /// Whether the subscription has no end date.
    #[must_use]
    pub fn is_open_ended(&self) -> bool {
        self.end_date.is_none()
    }

    /// Whether the end date, if any, is not before the start date.
    #[must_use]
    pub fn has_valid_interval(&self) -> bool {
        interval_is_valid(self.start_date, self.end_date)
    }
}

/// New Subscription Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: u64,
    pub user_id: UserUuid,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
}

impl NewSubscription {
    #[must_use]
    pub fn has_valid_interval(&self) -> bool {
        interval_is_valid(self.start_date, self.end_date)
    }
}

/// Partial update of a subscription's mutable fields.
///
/// The store only performs full-row updates, so a patch is merged into a
/// previously fetched [`Subscription`] before being written back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionPatch {
    pub service_name: Option<String>,
    pub price: Option<u64>,
    pub user_id: Option<UserUuid>,
    pub start_date: Option<Timestamp>,

    /// `None` leaves the end date untouched, `Some(None)` makes the
    /// subscription open-ended and `Some(Some(_))` sets a new end date.
    pub end_date: Option<Option<Timestamp>>,
}

impl SubscriptionPatch {
    /// Overwrite every field present in the patch.
    pub fn apply_to(self, subscription: &mut Subscription) {
        if let Some(service_name) = self.service_name {
            subscription.service_name = service_name;
        }

        if let Some(price) = self.price {
            subscription.price = price;
        }

        if let Some(user_id) = self.user_id {
            subscription.user_id = user_id;
        }

        if let Some(start_date) = self.start_date {
            subscription.start_date = start_date;
        }

        if let Some(end_date) = self.end_date {
            subscription.end_date = end_date;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn interval_is_valid(start_date: Timestamp, end_date: Option<Timestamp>) -> bool {
    end_date.is_none_or(|end_date| end_date >= start_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription() -> Subscription {
        Subscription {
            id: SubscriptionId::new(7),
            service_name: "Yandex Plus".to_string(),
            price: 400,
            user_id: UserUuid::new(),
            start_date: "2025-07-01T00:00:00Z".parse().unwrap(),
            end_date: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn empty_patch_leaves_record_untouched() {
        let mut sub = subscription();
        let before = sub.clone();

        SubscriptionPatch::default().apply_to(&mut sub);

        assert_eq!(sub, before);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut sub = subscription();
        let user_id = sub.user_id;

        SubscriptionPatch {
            price: Some(599),
            end_date: Some(Some("2025-12-31T00:00:00Z".parse().unwrap())),
            ..SubscriptionPatch::default()
        }
        .apply_to(&mut sub);

        assert_eq!(sub.price, 599);
        assert_eq!(sub.service_name, "Yandex Plus");
        assert_eq!(sub.user_id, user_id);
        assert!(!sub.is_open_ended());
    }

    #[test]
    fn patch_can_reopen_a_closed_subscription() {
        let mut sub = subscription();
        sub.end_date = Some("2025-08-01T00:00:00Z".parse().unwrap());

        SubscriptionPatch {
            end_date: Some(None),
            ..SubscriptionPatch::default()
        }
        .apply_to(&mut sub);

        assert!(sub.is_open_ended());
    }

    #[test]
    fn id_and_created_at_survive_patching() {
        let mut sub = subscription();

        SubscriptionPatch {
            service_name: Some("Kinopoisk".to_string()),
            ..SubscriptionPatch::default()
        }
        .apply_to(&mut sub);

        assert_eq!(sub.id, SubscriptionId::new(7));
        assert_eq!(sub.created_at, Timestamp::UNIX_EPOCH);
    }

    #[test]
    fn end_before_start_is_an_invalid_interval() {
        let mut sub = subscription();
        assert!(sub.has_valid_interval());

        sub.end_date = Some("2025-06-30T23:59:59Z".parse().unwrap());
        assert!(!sub.has_valid_interval());

        sub.end_date = Some(sub.start_date);
        assert!(sub.has_valid_interval());
    }
}
