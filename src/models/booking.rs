// src/models/booking.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// pending -> confirmed | cancelled, confirmed -> cancelled.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }

    pub fn blocks_room(self) -> bool {
        self != BookingStatus::Cancelled
    }
}

// --- Structs ---

/// Intervalo já reservado de um quarto, semiaberto `[start, end)`.
///
/// `None` no início significa "desde sempre"; `None` no fim, "sem data de saída".
/// Limites ausentes ampliam o bloqueio, nunca o reduzem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationInterval {
    #[sqlx(rename = "start_time")]
    pub start: Option<DateTime<Utc>>,
    #[sqlx(rename = "end_time")]
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,
    pub room_id: Uuid,
    pub tenant_id: Uuid,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[schema(example = "230.00")]
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn interval(&self) -> ReservationInterval {
        ReservationInterval {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

// Dados para inserir uma nova reserva (sempre entra como pending)
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: Uuid,
    pub tenant_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: Decimal,
}
