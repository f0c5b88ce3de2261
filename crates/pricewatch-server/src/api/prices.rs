use axum::{
    extract::{Path, State},
    Extension, Json,
};
use pricewatch_core::{AggregateResult, PriceQuote};

use crate::middleware::RequestId;

use super::{map_core_error, ApiError, AppState};

/// `GET /api/prices/{asin}`: every store, ranked cheapest first.
pub(super) async fn compare_prices(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(asin): Path<String>,
) -> Result<Json<AggregateResult>, ApiError> {
    let result = state
        .service
        .quote_all(&asin)
        .await
        .map_err(|e| map_core_error(req_id.0.clone(), &e))?;
    Ok(Json(result))
}

/// `GET /api/price/{asin}/{store_id}`
pub(super) async fn store_price(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((asin, store_id)): Path<(String, String)>,
) -> Result<Json<PriceQuote>, ApiError> {
    let quote = state
        .service
        .quote_one(&asin, &store_id)
        .await
        .map_err(|e| map_core_error(req_id.0.clone(), &e))?;
    Ok(Json(quote))
}
