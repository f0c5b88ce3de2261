use axum::{extract::State, Json};
use pricewatch_core::StoreDescriptor;

use super::AppState;

pub(super) async fn list_stores(State(state): State<AppState>) -> Json<Vec<StoreDescriptor>> {
    Json(state.service.stores().to_vec())
}
