//! GET /restaurants, GET /restaurants/:id, DELETE /restaurants/:id.

use crate::error::AppError;
use crate::response::ok;
use crate::service::PizzeriaService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// Ids that are not plain integers (optional `-`, then ASCII digits) cannot name a restaurant.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    let digits = id_str.strip_prefix('-').unwrap_or(id_str);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::restaurant_not_found());
    }
    id_str.parse().map_err(|_| AppError::restaurant_not_found())
}

pub async fn list_restaurants(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = PizzeriaService::list_restaurants(state.store.as_ref()).await?;
    Ok(ok(rows))
}

pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let detail = PizzeriaService::get_restaurant(state.store.as_ref(), id).await?;
    Ok(ok(detail))
}

pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    PizzeriaService::delete_restaurant(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_id_is_not_found() {
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id("99999999999"), Err(AppError::NotFound(_))));
        assert_eq!(parse_id("12").unwrap(), 12);
        assert_eq!(parse_id("-3").unwrap(), -3);
    }

    #[test]
    fn signs_and_whitespace_are_not_ids() {
        for bad in ["+1", "-", "", " 1", "1 ", "--1", "1e2"] {
            assert!(matches!(parse_id(bad), Err(AppError::NotFound(_))), "{bad:?}");
        }
    }
}
