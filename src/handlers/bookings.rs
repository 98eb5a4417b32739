// src/handlers/bookings.rs

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    calculator::{day_stay::DayStay, hour_stay::HourStay},
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::booking::{Booking, BookingStatus},
};

// =============================================================================
//  1. CRIAÇÃO
// =============================================================================

// POST /api/rooms/{room_id}/bookings/daily
#[utoipa::path(
    post,
    path = "/api/rooms/{room_id}/bookings/daily",
    tag = "Bookings",
    request_body = DayStay,
    responses(
        (status = 201, description = "Reserva criada como pending", body = Booking),
        (status = 400, description = "Horas extras acima do limite"),
        (status = 409, description = "Conflito com reserva existente"),
        (status = 422, description = "Datas inválidas ou total zero")
    ),
    params(
        ("room_id" = Uuid, Path, description = "ID do quarto"),
        ("x-tenant-id" = Uuid, Header, description = "ID do inquilino")
    )
)]
pub async fn create_daily_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<DayStay>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let booking = app_state
        .booking_service
        .book_daily(room_id, tenant.0, &payload, Utc::now())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// POST /api/rooms/{room_id}/bookings/hourly
#[utoipa::path(
    post,
    path = "/api/rooms/{room_id}/bookings/hourly",
    tag = "Bookings",
    request_body = HourStay,
    responses(
        (status = 201, description = "Reserva criada como pending", body = Booking),
        (status = 409, description = "Conflito com reserva existente"),
        (status = 422, description = "Data no passado ou total zero")
    ),
    params(
        ("room_id" = Uuid, Path, description = "ID do quarto"),
        ("x-tenant-id" = Uuid, Header, description = "ID do inquilino")
    )
)]
pub async fn create_hourly_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<HourStay>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = app_state
        .booking_service
        .book_hourly(room_id, tenant.0, &payload, Utc::now())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// =============================================================================
//  2. HISTÓRICO
// =============================================================================

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBookingsQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit_range"))]
    pub limit: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "offset_range"))]
    pub offset: i64,
}

// GET /api/bookings/mine
#[utoipa::path(
    get,
    path = "/api/bookings/mine",
    tag = "Bookings",
    responses(
        (status = 200, description = "Reservas do inquilino, mais recentes primeiro", body = Vec<Booking>),
        (status = 400, description = "Paginação inválida")
    ),
    params(
        ListBookingsQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do inquilino")
    )
)]
pub async fn list_my_bookings(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    query: Result<Query<ListBookingsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Rejeição do axum sai em texto puro; aqui vira o mesmo corpo localizado dos outros 400
    let Query(query) = query.map_err(|rejection| {
        AppError::InvalidQuery(rejection.body_text()).to_api_error(&locale, &app_state.i18n_store)
    })?;

    query
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let bookings = app_state
        .booking_service
        .tenant_history(tenant.0, query.limit, query.offset)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(bookings)))
}

// =============================================================================
//  3. TRANSIÇÃO (locador / admin)
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    #[schema(example = "confirmed")]
    pub status: BookingStatus,
}

// PATCH /api/bookings/{booking_id}/status
#[utoipa::path(
    patch,
    path = "/api/bookings/{booking_id}/status",
    tag = "Bookings",
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status alterado", body = Booking),
        (status = 404, description = "Reserva não encontrada"),
        (status = 409, description = "Transição não permitida")
    ),
    params(("booking_id" = Uuid, Path, description = "ID da reserva"))
)]
pub async fn update_booking_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = app_state
        .booking_service
        .update_status(booking_id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(booking)))
}
