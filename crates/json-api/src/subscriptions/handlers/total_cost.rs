//! Total Cost Handler

use salvo::{
    oapi::{ToParameters, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use subtally_app::subscriptions::costs::CostQuery;

use crate::{extensions::*, subscriptions::errors::into_status_error};

/// Cost range and optional filters.
#[derive(Debug, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct TotalCostParams {
    /// First day of the range, `YYYY-MM-DD`, inclusive
    pub start_date: String,

    /// Last day of the range, `YYYY-MM-DD`, inclusive
    pub end_date: String,

    pub user_id: Option<Uuid>,

    pub service_name: Option<String>,
}

impl From<&TotalCostParams> for CostQuery {
    fn from(params: &TotalCostParams) -> Self {
        CostQuery {
            user_id: params.user_id.map(Into::into),
            service_name: params.service_name.clone(),
            range_start: params.start_date.clone(),
            range_end: params.end_date.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Period {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalCostFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalCostResponse {
    /// Sum of prices, in minor currency units
    pub total_cost: u64,

    pub period: Period,

    pub filters: TotalCostFilters,
}

/// Total Cost Handler
///
/// Sums the prices of subscriptions active at any point in the period.
#[endpoint(
    tags("subscriptions"),
    summary = "Total Subscription Cost",
    responses(
        (status_code = StatusCode::OK, description = "Total cost"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    params: TotalCostParams,
    depot: &mut Depot,
) -> Result<Json<TotalCostResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let total_cost = state
        .app
        .subscriptions
        .total_cost(&state.cancellation(), CostQuery::from(&params))
        .await
        .map_err(into_status_error)?;

    info!(
        start_date = %params.start_date,
        end_date = %params.end_date,
        total_cost,
        "calculated total cost"
    );

    Ok(Json(TotalCostResponse {
        total_cost,
        period: Period {
            start_date: params.start_date,
            end_date: params.end_date,
        },
        filters: TotalCostFilters {
            user_id: params.user_id,
            service_name: params.service_name,
        },
    }))
}
