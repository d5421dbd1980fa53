//! Subscription cost aggregation.
//!
//! A subscription contributes its full price to a date range when its active
//! interval overlaps the range:
//!
//! ```text
//! start_date <= range_end AND (end_date IS NULL OR end_date >= range_start)
//! ```
//!
//! Both bounds are inclusive and compared against the UTC calendar date of
//! the stored instants. An open-ended subscription never ends, so it always
//! satisfies the second clause.

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::subscriptions::{
    errors::{Operation, SubscriptionsServiceError},
    models::UserUuid,
    predicates::Conditions,
};

const TOTAL_COST_SQL: &str = include_str!("sql/total_cost.sql");

/// Wire format of range bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Total cost request: optional filters plus the unparsed range bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostQuery {
    pub user_id: Option<UserUuid>,

    /// Empty names are treated as no filter.
    pub service_name: Option<String>,

    /// `YYYY-MM-DD`, inclusive.
    pub range_start: String,

    /// `YYYY-MM-DD`, inclusive.
    pub range_end: String,
}

impl CostQuery {
    #[must_use]
    pub fn new(range_start: impl Into<String>, range_end: impl Into<String>) -> Self {
        Self {
            user_id: None,
            service_name: None,
            range_start: range_start.into(),
            range_end: range_end.into(),
        }
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

    /// Parse both bounds into a [`DateRange`].
    pub fn range(&self) -> Result<DateRange, SubscriptionsServiceError> {
        DateRange::parse(&self.range_start, &self.range_end)
    }
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, SubscriptionsServiceError> {
        if start > end {
            return Err(SubscriptionsServiceError::InvalidRange {
                operation: Operation::TotalCost,
                start,
                end,
            });
        }

        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, SubscriptionsServiceError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(self) -> Date {
        self.start
    }

    pub fn end(self) -> Date {
        self.end
    }
}

fn parse_date(value: &str) -> Result<Date, SubscriptionsServiceError> {
    let invalid = |source| SubscriptionsServiceError::InvalidDate {
        operation: Operation::TotalCost,
        value: value.to_string(),
        source,
    };

    // `%Y` alone would also take signs, padding and short fields.
    if !is_calendar_date_shape(value) {
        return Err(invalid(None));
    }

    Date::strptime(DATE_FORMAT, value).map_err(|source| invalid(Some(source)))
}

/// Exactly `DDDD-DD-DD`, ASCII digits only.
fn is_calendar_date_shape(value: &str) -> bool {
    value.len() == 10
        && value.bytes().enumerate().all(|(i, byte)| match i {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCostsRepository;

impl PgCostsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn total_cost(
        &self,
        pool: &PgPool,
        user_id: Option<UserUuid>,
        service_name: Option<&str>,
        range: DateRange,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = total_cost_query(user_id, service_name, range);

        // `SUM(BIGINT)` is `NUMERIC` and may exceed `BIGINT`; read it as text.
        let total: String = builder.build_query_scalar().fetch_one(pool).await?;

        total
            .parse::<u64>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "total_cost".to_string(),
                source: Box::new(e),
            })
    }
}

pub(super) fn total_cost_query(
    user_id: Option<UserUuid>,
    service_name: Option<&str>,
    range: DateRange,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(TOTAL_COST_SQL);
    let mut conditions = Conditions::new(&mut builder);

    conditions
        .and()
        .push("(start_date AT TIME ZONE 'UTC')::date <= ")
        .push_bind(SqlxDate::from(range.end));

    conditions
        .and()
        .push("(end_date IS NULL OR (end_date AT TIME ZONE 'UTC')::date >= ")
        .push_bind(SqlxDate::from(range.start))
        .push(")");

    if let Some(user_id) = user_id {
        conditions
            .and()
            .push("user_id = ")
            .push_bind(user_id.into_uuid());
    }

    if let Some(service_name) = service_name.filter(|name| !name.is_empty()) {
        conditions
            .and()
            .push("service_name = ")
            .push_bind(service_name.to_string());
    }

    builder
}
