//! Incremental `WHERE` clause construction.
//!
//! Conditions are only appended for filters that are present, so an absent
//! filter never turns into a comparison against `NULL`. Every value is bound
//! as a parameter.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, QueryBuilder};

use crate::subscriptions::query::SubscriptionQuery;

pub(super) struct Conditions<'b, 'args> {
    builder: &'b mut QueryBuilder<'args, Postgres>,
    empty: bool,
}

impl<'b, 'args> Conditions<'b, 'args> {
    pub(super) fn new(builder: &'b mut QueryBuilder<'args, Postgres>) -> Self {
        Self {
            builder,
            empty: true,
        }
    }

    /// Start the next condition, returning the builder to write it into.
    pub(super) fn and(&mut self) -> &mut QueryBuilder<'args, Postgres> {
        self.builder
            .push(if self.empty { " WHERE " } else { " AND " });

        self.empty = false;

        &mut *self.builder
    }
}

/// Push the equality and `start_date` range filters shared by listing and
/// counting.
pub(super) fn push_filters(
    conditions: &mut Conditions<'_, '_>,
    query: &SubscriptionQuery,
) -> Result<(), sqlx::Error> {
    if let Some(user_id) = query.user_id() {
        conditions
            .and()
            .push("user_id = ")
            .push_bind(user_id.into_uuid());
    }

    if let Some(service_name) = query.service_name() {
        conditions
            .and()
            .push("service_name = ")
            .push_bind(service_name.to_string());
    }

    if let Some(price) = query.price() {
        conditions
            .and()
            .push("price = ")
            .push_bind(encode_amount(price)?);
    }

    if let Some(from) = query.start_date_from() {
        conditions
            .and()
            .push("start_date >= ")
            .push_bind(SqlxTimestamp::from(from));
    }

    if let Some(to) = query.start_date_to() {
        conditions
            .and()
            .push("start_date <= ")
            .push_bind(SqlxTimestamp::from(to));
    }

    Ok(())
}

/// Prices are unsigned in the model but stored as `BIGINT`.
pub(super) fn encode_amount(amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
