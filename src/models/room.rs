// src/models/room.rs

use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

// Só o que o cálculo de reserva precisa. O resto do quarto fica no backend gerenciado.
#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: Uuid,
    pub title: String,
    pub price_per_day: Decimal,
}
