//! Subscriptions service errors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::Date;
use sqlx::Error;
use thiserror::Error;

use crate::cancellation::Interrupted;

/// Service operation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Store,
    Get,
    Update,
    Delete,
    List,
    Count,
    TotalCost,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Store => "subscriptions.store",
            Self::Get => "subscriptions.get",
            Self::Update => "subscriptions.update",
            Self::Delete => "subscriptions.delete",
            Self::List => "subscriptions.list",
            Self::Count => "subscriptions.count",
            Self::TotalCost => "subscriptions.total_cost",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Subscriptions service error variants.
#[derive(Debug, Error)]
pub enum SubscriptionsServiceError {
    /// No row matched the targeted id.
    #[error("{operation}: subscription not found")]
    NotFound { operation: Operation },

    /// A value could not be encoded into the statement.
    #[error("{operation}: failed to build query")]
    Build {
        operation: Operation,
        #[source]
        source: Error,
    },

    /// The backend failed or rejected the statement.
    #[error("{operation}: failed to execute query")]
    Exec {
        operation: Operation,
        #[source]
        source: Error,
    },

    /// A result row did not have the expected shape.
    #[error("{operation}: failed to read result row")]
    Scan {
        operation: Operation,
        #[source]
        source: Error,
    },

    /// A range bound is not a `YYYY-MM-DD` calendar date.
    #[error("{operation}: invalid date `{value}`, expected YYYY-MM-DD")]
    InvalidDate {
        operation: Operation,
        value: String,
        #[source]
        source: Option<jiff::Error>,
    },

    /// The range starts after it ends.
    #[error("{operation}: range start {start} is after range end {end}")]
    InvalidRange {
        operation: Operation,
        start: Date,
        end: Date,
    },

    /// The caller canceled the operation while it was in flight.
    #[error("{operation}: canceled")]
    Canceled { operation: Operation },

    /// The caller's deadline passed while the operation was in flight.
    #[error("{operation}: deadline exceeded")]
    DeadlineExceeded { operation: Operation },
}

impl SubscriptionsServiceError {
    pub(crate) fn from_sqlx(operation: Operation, error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound { operation },
            Error::Encode(_) => Self::Build {
                operation,
                source: error,
            },
            Error::ColumnDecode { .. }
            | Error::ColumnNotFound(_)
            | Error::ColumnIndexOutOfBounds { .. }
            | Error::Decode(_)
            | Error::TypeNotFound { .. } => Self::Scan {
                operation,
                source: error,
            },
            _ => Self::Exec {
                operation,
                source: error,
            },
        }
    }

    pub(crate) fn interrupted(operation: Operation, interrupted: Interrupted) -> Self {
        match interrupted {
            Interrupted::Canceled => Self::Canceled { operation },
            Interrupted::DeadlineExceeded => Self::DeadlineExceeded { operation },
        }
    }

    /// The operation the error was raised by.
    pub fn operation(&self) -> Operation {
        match self {
            Self::NotFound { operation }
            | Self::Build { operation, .. }
            | Self::Exec { operation, .. }
            | Self::Scan { operation, .. }
            | Self::InvalidDate { operation, .. }
            | Self::InvalidRange { operation, .. }
            | Self::Canceled { operation }
            | Self::DeadlineExceeded { operation } => *operation,
        }
    }

    /// Absence rather than failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Caller-supplied input was rejected before reaching the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidDate { .. } | Self::InvalidRange { .. })
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Canceled { .. } | Self::DeadlineExceeded { .. })
    }
}
