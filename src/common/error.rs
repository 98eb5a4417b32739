// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    common::i18n::I18nStore,
    middleware::i18n::Locale,
    models::booking::{BookingStatus, ReservationInterval},
};

// Erro de domínio. Os handlers convertem para ApiError (já localizado).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Query string inválida: {0}")]
    InvalidQuery(String),

    #[error("Quarto {0} não encontrado")]
    RoomNotFound(Uuid),

    #[error("Reserva {0} não encontrada")]
    BookingNotFound(Uuid),

    #[error("Data de check-in no passado")]
    CheckinInPast,

    #[error("O checkout deve ser posterior ao check-in")]
    InvalidCheckout,

    #[error("Preço diário inválido: {0}")]
    InvalidRate(Decimal),

    #[error("As horas extras conflitam com outra reserva")]
    ExtraHoursConflict,

    #[error("Não há horas extras para remover")]
    ExtraHoursAtMinimum,

    #[error("O intervalo conflita com {} reserva(s) existente(s)", .0.len())]
    BookingConflict(Vec<ReservationInterval>),

    #[error("Reserva com preço total zero")]
    ZeroPrice,

    #[error("Transição de status inválida: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Falha ao registrar a reserva")]
    BookingFailed,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Chave do catálogo de mensagens (ver `I18nStore`).
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::InvalidQuery(_) => "invalid_query",
            AppError::RoomNotFound(_) => "room_not_found",
            AppError::BookingNotFound(_) => "booking_not_found",
            AppError::CheckinInPast => "checkin_in_past",
            AppError::InvalidCheckout => "invalid_checkout",
            AppError::InvalidRate(_) => "invalid_rate",
            AppError::ExtraHoursConflict => "extra_hours_conflict",
            AppError::ExtraHoursAtMinimum => "extra_hours_at_minimum",
            AppError::BookingConflict(_) => "booking_conflict",
            AppError::ZeroPrice => "zero_price",
            AppError::InvalidStatusTransition { .. } => "invalid_status_transition",
            AppError::BookingFailed => "booking_failed",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::RoomNotFound(_) | AppError::BookingNotFound(_) => StatusCode::NOT_FOUND,
            AppError::CheckinInPast
            | AppError::InvalidCheckout
            | AppError::InvalidRate(_)
            | AppError::ExtraHoursAtMinimum
            | AppError::ZeroPrice => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ExtraHoursConflict
            | AppError::BookingConflict(_)
            | AppError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
            AppError::BookingFailed
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro de domínio na resposta HTTP, traduzida para o idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut fields = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(key) => i18n.translate(&locale.0, key),
                            None => e.code.to_string(),
                        })
                        .collect();
                    fields.insert(field.to_string(), messages);
                }
                Some(json!(fields))
            }
            AppError::InvalidQuery(reason) => Some(json!({ "reason": reason })),
            AppError::BookingConflict(conflicts) => Some(json!({ "conflicts": conflicts })),
            AppError::InvalidStatusTransition { from, to } => {
                Some(json!({ "from": from, "to": to }))
            }
            _ => None,
        };

        ApiError {
            status,
            error: i18n.translate(&locale.0, self.message_key()),
            details,
        }
    }
}

// O que de fato vai para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}
