// src/handlers/quotes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    calculator::{
        day_stay::{CheckoutAdjustment, DayStay},
        hour_stay::HourStay,
        StayQuote,
    },
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

// POST /api/rooms/{room_id}/quotes/daily
#[utoipa::path(
    post,
    path = "/api/rooms/{room_id}/quotes/daily",
    tag = "Quotes",
    request_body = DayStay,
    responses(
        (status = 200, description = "Cotação por diária", body = StayQuote),
        (status = 400, description = "Horas extras acima do limite"),
        (status = 404, description = "Quarto não encontrado"),
        (status = 422, description = "Datas inválidas")
    ),
    params(("room_id" = Uuid, Path, description = "ID do quarto"))
)]
pub async fn quote_daily(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<DayStay>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let quote = app_state
        .booking_service
        .quote_daily(room_id, &payload, Utc::now())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustExtraHoursPayload {
    #[serde(flatten)]
    pub stay: DayStay,
    #[schema(example = "late")]
    pub adjustment: CheckoutAdjustment,
}

// POST /api/rooms/{room_id}/quotes/daily/extra-hours
#[utoipa::path(
    post,
    path = "/api/rooms/{room_id}/quotes/daily/extra-hours",
    tag = "Quotes",
    request_body = AdjustExtraHoursPayload,
    responses(
        (status = 200, description = "Cotação com as horas extras ajustadas", body = StayQuote),
        (status = 400, description = "Horas extras acima do limite"),
        (status = 409, description = "Checkout tardio conflita com outra reserva"),
        (status = 422, description = "Não há horas extras para remover")
    ),
    params(("room_id" = Uuid, Path, description = "ID do quarto"))
)]
pub async fn adjust_extra_hours(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<AdjustExtraHoursPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .stay
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let quote = app_state
        .booking_service
        .adjust_extra_hours(room_id, &payload.stay, payload.adjustment, Utc::now())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}

// POST /api/rooms/{room_id}/quotes/hourly
#[utoipa::path(
    post,
    path = "/api/rooms/{room_id}/quotes/hourly",
    tag = "Quotes",
    request_body = HourStay,
    responses(
        (status = 200, description = "Cotação por hora", body = StayQuote),
        (status = 404, description = "Quarto não encontrado"),
        (status = 422, description = "Data no passado")
    ),
    params(("room_id" = Uuid, Path, description = "ID do quarto"))
)]
pub async fn quote_hourly(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<HourStay>,
) -> Result<impl IntoResponse, ApiError> {
    let quote = app_state
        .booking_service
        .quote_hourly(room_id, &payload, Utc::now())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}
