//! Subscription Index Handler

use salvo::{
    oapi::{ToParameters, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use subtally_app::subscriptions::query::{SortField, SortOrder, SubscriptionQuery};

use crate::{
    extensions::*,
    subscriptions::{errors::into_status_error, models::SubscriptionResponse},
};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Listing filters, sort and page.
#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct ListSubscriptionsParams {
    /// 1-based page number, defaults to 1
    pub page: Option<u32>,

    /// Rows per page, 1 to 100, defaults to 10
    pub page_size: Option<u32>,

    pub user_id: Option<Uuid>,

    pub service_name: Option<String>,

    pub price: Option<u64>,

    /// RFC 3339 lower bound on `start_date`, inclusive
    pub start_date_from: Option<String>,

    /// RFC 3339 upper bound on `start_date`, inclusive
    pub start_date_to: Option<String>,

    /// One of `start_date`, `service_name`, `price`, `created_at`, `id`
    pub sort_by: Option<String>,

    /// `asc` or `desc`
    pub sort_order: Option<String>,
}

/// A validated listing request.
#[derive(Debug)]
struct Listing {
    query: SubscriptionQuery,
    page: u32,
    page_size: u32,
}

impl TryFrom<ListSubscriptionsParams> for Listing {
    type Error = StatusError;

    fn try_from(params: ListSubscriptionsParams) -> Result<Self, Self::Error> {
        let page = params.page.unwrap_or(1);
        let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(StatusError::bad_request().brief("page must be at least 1"));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(StatusError::bad_request().brief("page_size must be between 1 and 100"));
        }

        let mut query = SubscriptionQuery::new().with_page(page, page_size);

        if let Some(sort_by) = params.sort_by {
            query = query.with_sort_by(sort_by.parse::<SortField>().or_400("invalid sort_by")?);
        }

        if let Some(sort_order) = params.sort_order {
            query = query.with_sort_order(sort_order.parse::<SortOrder>().or_400("invalid sort_order")?);
        }

        if let Some(user_id) = params.user_id {
            query = query.with_user_id(user_id.into());
        }

        if let Some(service_name) = params.service_name.filter(|name| !name.is_empty()) {
            query = query.with_service_name(service_name);
        }

        if let Some(price) = params.price {
            query = query.with_price(price.checked_price("price")?);
        }

        if let Some(from) = params.start_date_from {
            query = query.with_start_date_from(from.parse_timestamp("start_date_from")?);
        }

        if let Some(to) = params.start_date_to {
            query = query.with_start_date_to(to.parse_timestamp("start_date_to")?);
        }

        Ok(Self {
            query,
            page,
            page_size,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionsResponse {
    /// The requested page of subscriptions
    pub subscriptions: Vec<SubscriptionResponse>,

    /// Number of subscriptions matching the filters across all pages
    pub total: u64,

    pub page: u32,

    pub page_size: u32,

    pub total_pages: u64,
}

/// Subscription Index Handler
///
/// Returns one page of subscriptions matching the filters.
#[endpoint(
    tags("subscriptions"),
    summary = "List Subscriptions",
    responses(
        (status_code = StatusCode::OK, description = "Subscriptions page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    params: ListSubscriptionsParams,
    depot: &mut Depot,
) -> Result<Json<SubscriptionsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let listing = Listing::try_from(params)?;
    let cx = state.cancellation();

    let subscriptions = state
        .app
        .subscriptions
        .list_subscriptions(&cx, listing.query.clone())
        .await
        .map_err(into_status_error)?;

    let total = state
        .app
        .subscriptions
        .count_subscriptions(&cx, listing.query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SubscriptionsResponse {
        subscriptions: subscriptions.into_iter().map(Into::into).collect(),
        total,
        page: listing.page,
        page_size: listing.page_size,
        total_pages: total.div_ceil(u64::from(listing.page_size)),
    }))
}
