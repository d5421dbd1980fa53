//! Subscription query options.
//!
//! [`SubscriptionQuery`] is an immutable description of which subscriptions
//! to read and in what order. Each `with_*` method consumes the query and
//! returns a new one with a single field replaced, so a query can be shared
//! between tasks without any risk of one caller's filters leaking into
//! another's.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::subscriptions::models::UserUuid;

/// Rows returned by a listing when no limit is given.
pub const DEFAULT_LIMIT: u32 = 50;

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    StartDate,
    ServiceName,
    Price,
    CreatedAt,
    Id,
}

impl SortField {
    pub const ALL: [Self; 5] = [
        Self::StartDate,
        Self::ServiceName,
        Self::Price,
        Self::CreatedAt,
        Self::Id,
    ];

    /// Column name; the only ordering text that ever reaches SQL.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::StartDate => "start_date",
            Self::ServiceName => "service_name",
            Self::Price => "price",
            Self::CreatedAt => "created_at",
            Self::Id => "id",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.column())
    }
}

impl FromStr for SortField {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| SortParseError::UnknownField(s.to_string()))
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

impl FromStr for SortOrder {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(SortParseError::UnknownOrder(s.to_string())),
        }
    }
}

/// Rejected sort parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortParseError {
    #[error("unknown sort field `{0}`")]
    UnknownField(String),

    #[error("unknown sort order `{0}`, expected `asc` or `desc`")]
    UnknownOrder(String),
}

/// Filter, ordering and pagination for subscription reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionQuery {
    user_id: Option<UserUuid>,
    service_name: Option<String>,
    price: Option<u64>,
    start_date_from: Option<Timestamp>,
    start_date_to: Option<Timestamp>,
    limit: Option<u32>,
    offset: u32,
    sort_by: SortField,
    sort_order: SortOrder,
}

impl Default for SubscriptionQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            service_name: None,
            price: None,
            start_date_from: None,
            start_date_to: None,
            limit: Some(DEFAULT_LIMIT),
            offset: 0,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl SubscriptionQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_id(self, user_id: UserUuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..self
        }
    }

    #[must_use]
    pub fn with_service_name(self, service_name: impl Into<String>) -> Self {
        Self {
            service_name: Some(service_name.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_price(self, price: u64) -> Self {
        Self {
            price: Some(price),
            ..self
        }
    }

    /// Inclusive lower bound on `start_date`.
    #[must_use]
    pub fn with_start_date_from(self, from: Timestamp) -> Self {
        Self {
            start_date_from: Some(from),
            ..self
        }
    }

    /// Inclusive upper bound on `start_date`.
    #[must_use]
    pub fn with_start_date_to(self, to: Timestamp) -> Self {
        Self {
            start_date_to: Some(to),
            ..self
        }
    }

    /// Maximum number of rows; `0` removes the limit.
    #[must_use]
    pub fn with_limit(self, limit: u32) -> Self {
        Self {
            limit: (limit > 0).then_some(limit),
            ..self
        }
    }

    #[must_use]
    pub fn without_limit(self) -> Self {
        Self {
            limit: None,
            ..self
        }
    }

    #[must_use]
    pub fn with_offset(self, offset: u32) -> Self {
        Self { offset, ..self }
    }

    /// Window for a 1-based `page` of `page_size` rows. Page `0` is treated
    /// as the first page.
    #[must_use]
    pub fn with_page(self, page: u32, page_size: u32) -> Self {
        self.with_limit(page_size)
            .with_offset(page.saturating_sub(1).saturating_mul(page_size))
    }

    #[must_use]
    pub fn with_sort_by(self, sort_by: SortField) -> Self {
        Self { sort_by, ..self }
    }

    #[must_use]
    pub fn with_sort_order(self, sort_order: SortOrder) -> Self {
        Self { sort_order, ..self }
    }

    pub fn user_id(&self) -> Option<UserUuid> {
        self.user_id
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    pub fn price(&self) -> Option<u64> {
        self.price
    }

    pub fn start_date_from(&self) -> Option<Timestamp> {
        self.start_date_from
    }

    pub fn start_date_to(&self) -> Option<Timestamp> {
        self.start_date_to
    }

    /// `None` when unbounded.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_lists_fifty_newest_by_start_date() {
        let query = SubscriptionQuery::default();

        assert_eq!(query.limit(), Some(50));
        assert_eq!(query.offset(), 0);
        assert_eq!(query.sort_by(), SortField::StartDate);
        assert_eq!(query.sort_order(), SortOrder::Desc);
        assert_eq!(query.user_id(), None);
        assert_eq!(query.service_name(), None);
        assert_eq!(query.price(), None);
    }

    #[test]
    fn last_write_wins_for_a_field() {
        let query = SubscriptionQuery::new()
            .with_price(100)
            .with_service_name("Netflix")
            .with_price(200);

        assert_eq!(query.price(), Some(200));
        assert_eq!(query.service_name(), Some("Netflix"));
    }

    #[test]
    fn order_across_fields_is_irrelevant() {
        let user = UserUuid::new();

        let a = SubscriptionQuery::new()
            .with_user_id(user)
            .with_service_name("Spotify")
            .with_limit(5);

        let b = SubscriptionQuery::new()
            .with_limit(5)
            .with_service_name("Spotify")
            .with_user_id(user);

        assert_eq!(a, b);
    }

    #[test]
    fn builders_leave_the_base_query_intact() {
        let base = SubscriptionQuery::new().with_service_name("Spotify");
        let derived = base.clone().with_price(10);

        assert_eq!(base.price(), None);
        assert_eq!(derived.service_name(), Some("Spotify"));
        assert_eq!(derived.price(), Some(10));
    }

    #[test]
    fn zero_limit_means_unbounded() {
        assert_eq!(SubscriptionQuery::new().with_limit(0).limit(), None);
        assert_eq!(SubscriptionQuery::new().without_limit().limit(), None);
        assert_eq!(SubscriptionQuery::new().with_limit(3).limit(), Some(3));
    }

    #[test]
    fn page_translates_to_limit_and_offset() {
        let query = SubscriptionQuery::new().with_page(3, 20);

        assert_eq!(query.limit(), Some(20));
        assert_eq!(query.offset(), 40);

        let first = SubscriptionQuery::new().with_page(0, 20);
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn sort_field_only_accepts_known_columns() {
        for field in SortField::ALL {
            assert_eq!(field.column().parse::<SortField>().ok(), Some(field));
        }

        assert_eq!(
            "price; DROP TABLE subscriptions".parse::<SortField>(),
            Err(SortParseError::UnknownField(
                "price; DROP TABLE subscriptions".to_string()
            ))
        );
        assert!("START_DATE".parse::<SortField>().is_err());
    }

    #[test]
    fn sort_order_only_accepts_asc_or_desc() {
        assert_eq!("asc".parse::<SortOrder>().ok(), Some(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>().ok(), Some(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
