//! Subscriptions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as};

use crate::{
    ids::SubscriptionId,
    subscriptions::{
        models::{NewSubscription, Subscription, UserUuid},
        predicates::{Conditions, encode_amount, push_filters},
        query::{SortField, SubscriptionQuery},
    },
};

const CREATE_SUBSCRIPTION_SQL: &str = include_str!("sql/create_subscription.sql");
const GET_SUBSCRIPTION_SQL: &str = include_str!("sql/get_subscription.sql");
const UPDATE_SUBSCRIPTION_SQL: &str = include_str!("sql/update_subscription.sql");
const DELETE_SUBSCRIPTION_SQL: &str = include_str!("sql/delete_subscription.sql");
const LIST_SUBSCRIPTIONS_SQL: &str = include_str!("sql/list_subscriptions.sql");
const COUNT_SUBSCRIPTIONS_SQL: &str = include_str!("sql/count_subscriptions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSubscriptionsRepository;

impl PgSubscriptionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_subscription(
        &self,
        pool: &PgPool,
        subscription: NewSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        query_as::<Postgres, Subscription>(CREATE_SUBSCRIPTION_SQL)
            .bind(subscription.service_name)
            .bind(encode_amount(subscription.price)?)
            .bind(subscription.user_id.into_uuid())
            .bind(SqlxTimestamp::from(subscription.start_date))
            .bind(subscription.end_date.map(SqlxTimestamp::from))
            .fetch_one(pool)
            .await
    }

    pub(crate) async fn get_subscription(
        &self,
        pool: &PgPool,
        id: SubscriptionId,
    ) -> Result<Subscription, sqlx::Error> {
        query_as::<Postgres, Subscription>(GET_SUBSCRIPTION_SQL)
            .bind(id.get())
            .fetch_one(pool)
            .await
    }

    /// Overwrite every mutable column of the row. A missing row surfaces as
    /// [`sqlx::Error::RowNotFound`].
    pub(crate) async fn update_subscription(
        &self,
        pool: &PgPool,
        subscription: Subscription,
    ) -> Result<Subscription, sqlx::Error> {
        query_as::<Postgres, Subscription>(UPDATE_SUBSCRIPTION_SQL)
            .bind(subscription.id.get())
            .bind(subscription.service_name)
            .bind(encode_amount(subscription.price)?)
            .bind(subscription.user_id.into_uuid())
            .bind(SqlxTimestamp::from(subscription.start_date))
            .bind(subscription.end_date.map(SqlxTimestamp::from))
            .fetch_one(pool)
            .await
    }

    pub(crate) async fn delete_subscription(
        &self,
        pool: &PgPool,
        id: SubscriptionId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SUBSCRIPTION_SQL)
            .bind(id.get())
            .execute(pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_subscriptions(
        &self,
        pool: &PgPool,
        query: &SubscriptionQuery,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let mut builder = list_query(query)?;

        builder
            .build_query_as::<Subscription>()
            .fetch_all(pool)
            .await
    }

    pub(crate) async fn count_subscriptions(
        &self,
        pool: &PgPool,
        query: &SubscriptionQuery,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = count_query(query)?;

        let count: i64 = builder.build_query_scalar().fetch_one(pool).await?;

        decode_amount(count, "count")
    }
}

/// `SELECT` for a listing: filters, then ordering, then the window.
pub(super) fn list_query(
    query: &SubscriptionQuery,
) -> Result<QueryBuilder<'static, Postgres>, sqlx::Error> {
    let mut builder = QueryBuilder::new(LIST_SUBSCRIPTIONS_SQL);

    push_filters(&mut Conditions::new(&mut builder), query)?;

    let order = query.sort_order().keyword();

    builder
        .push(" ORDER BY ")
        .push(query.sort_by().column())
        .push(" ")
        .push(order);

    // Ties on the sort column would otherwise shuffle rows between pages.
    if query.sort_by() != SortField::Id {
        builder.push(", id ").push(order);
    }

    if let Some(limit) = query.limit() {
        builder.push(" LIMIT ").push_bind(i64::from(limit));
    }

    if query.offset() > 0 {
        builder.push(" OFFSET ").push_bind(i64::from(query.offset()));
    }

    Ok(builder)
}

/// `SELECT COUNT(*)` over the listing's filters; ordering and window are
/// ignored.
pub(super) fn count_query(
    query: &SubscriptionQuery,
) -> Result<QueryBuilder<'static, Postgres>, sqlx::Error> {
    let mut builder = QueryBuilder::new(COUNT_SUBSCRIPTIONS_SQL);

    push_filters(&mut Conditions::new(&mut builder), query)?;

    Ok(builder)
}

pub(super) fn decode_amount(amount: i64, col: &str) -> Result<u64, sqlx::Error> {
    u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Subscription {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price = decode_amount(row.try_get("price")?, "price")?;

        Ok(Self {
            id: SubscriptionId::new(row.try_get("id")?),
            service_name: row.try_get("service_name")?,
            price,
            user_id: UserUuid::from_uuid(row.try_get("user_id")?),
            start_date: row.try_get::<SqlxTimestamp, _>("start_date")?.to_jiff(),
            end_date: row
                .try_get::<Option<SqlxTimestamp>, _>("end_date")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
