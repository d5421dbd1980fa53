//! Subscription Errors

use salvo::http::StatusError;
use tracing::error;

use subtally_app::subscriptions::SubscriptionsServiceError;

pub(crate) fn into_status_error(error: SubscriptionsServiceError) -> StatusError {
    match error {
        SubscriptionsServiceError::NotFound { .. } => {
            StatusError::not_found().brief("Subscription not found")
        }
        SubscriptionsServiceError::InvalidDate { .. }
        | SubscriptionsServiceError::InvalidRange { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        SubscriptionsServiceError::Build { .. }
        | SubscriptionsServiceError::Exec { .. }
        | SubscriptionsServiceError::Scan { .. }
        | SubscriptionsServiceError::Canceled { .. }
        | SubscriptionsServiceError::DeadlineExceeded { .. } => {
            let source = std::error::Error::source(&error)
                .map(ToString::to_string)
                .unwrap_or_default();

            error!(operation = %error.operation(), %source, "{error}");

            StatusError::internal_server_error()
        }
    }
}
