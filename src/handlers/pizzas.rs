//! GET /pizzas.

use crate::error::AppError;
use crate::response::ok;
use crate::service::PizzeriaService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list_pizzas(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = PizzeriaService::list_pizzas(state.store.as_ref()).await?;
    Ok(ok(rows))
}
