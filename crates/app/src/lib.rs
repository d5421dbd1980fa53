//! Subscription records and cost aggregation over `PostgreSQL`.

pub mod cancellation;
pub mod context;
pub mod database;
pub mod ids;
pub mod subscriptions;

#[cfg(test)]
mod test;
