// src/handlers/rooms.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::booking::ReservationInterval,
};

// GET /api/rooms/{room_id}/reservations
#[utoipa::path(
    get,
    path = "/api/rooms/{room_id}/reservations",
    tag = "Rooms",
    responses(
        (status = 200, description = "Intervalos ocupados (exceto cancelados)", body = Vec<ReservationInterval>),
        (status = 404, description = "Quarto não encontrado")
    ),
    params(("room_id" = Uuid, Path, description = "ID do quarto"))
)]
pub async fn list_room_reservations(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(room_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let intervals = app_state
        .booking_service
        .room_reservations(room_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(intervals)))
}
