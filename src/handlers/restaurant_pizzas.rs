//! POST /restaurant_pizzas.

use crate::error::{AppError, ValidationError};
use crate::response::created;
use crate::service::{CreateRestaurantPizza, PizzeriaService};
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use serde_json::Value;

/// Body rejections (bad JSON, wrong content type) are folded into the same 400 as other
/// validation failures instead of axum's default rejection responses.
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let req = CreateRestaurantPizza::from_body(&body)?;
    let row = PizzeriaService::create_restaurant_pizza(state.store.as_ref(), req).await?;
    Ok(created(row))
}
