//! Subscriptions

pub mod costs;
pub mod errors;
pub mod models;
mod predicates;
pub mod query;
mod repository;
pub mod service;

pub use errors::SubscriptionsServiceError;
pub use service::*;
