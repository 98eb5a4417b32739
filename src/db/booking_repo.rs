// src/db/booking_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        booking::{Booking, BookingStatus, NewBooking, ReservationInterval},
        room::Room,
    },
};

const BOOKING_COLUMNS: &str =
    "id, room_id, tenant_id, start_time, end_time, total_price, status, created_at";

// As tabelas pertencem ao backend gerenciado; aqui só lemos e inserimos.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_room(&self, room_id: Uuid) -> Result<Option<Room>, AppError>;

    /// Intervalos que ainda bloqueiam o quarto (tudo que não foi cancelado).
    async fn reservations_for_room(
        &self,
        room_id: Uuid,
    ) -> Result<Vec<ReservationInterval>, AppError>;

    /// Insere como `pending`, revalidando a sobreposição de forma atômica.
    /// Se houver conflito, retorna `AppError::BookingConflict`.
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, AppError>;

    async fn find_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, AppError>;

    async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, AppError>;

    /// Troca o status só se ele ainda for `expected` (compare-and-set).
    /// `None` quando a reserva não existe ou outro pedido já mudou o status.
    async fn update_status(
        &self,
        booking_id: Uuid,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError>;
}

#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_room(&self, room_id: Uuid) -> Result<Option<Room>, AppError> {
        let room = sqlx::query_as::<_, Room>(
            "SELECT id, title, price_per_day FROM rooms WHERE id = $1",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    async fn reservations_for_room(
        &self,
        room_id: Uuid,
    ) -> Result<Vec<ReservationInterval>, AppError> {
        let intervals = sqlx::query_as::<_, ReservationInterval>(
            r#"
            SELECT start_time, end_time
            FROM bookings
            WHERE room_id = $1 AND status <> 'cancelled'
            ORDER BY start_time ASC NULLS FIRST
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(intervals)
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        // Duas reservas simultâneas não podem passar pela checagem ao mesmo tempo
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        // Sobreposição semiaberta; limites NULL contam como abertos
        let overlapping = sqlx::query_as::<_, ReservationInterval>(
            r#"
            SELECT start_time, end_time
            FROM bookings
            WHERE room_id = $1
              AND status <> 'cancelled'
              AND (start_time IS NULL OR start_time < $3)
              AND (end_time IS NULL OR $2 < end_time)
            "#,
        )
        .bind(booking.room_id)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .fetch_all(&mut *tx)
        .await?;

        if !overlapping.is_empty() {
            return Err(AppError::BookingConflict(overlapping));
        }

        let created = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (room_id, tenant_id, start_time, end_time, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking.room_id)
        .bind(booking.tenant_id)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.total_price)
        .bind(BookingStatus::Pending)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn find_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn update_status(
        &self,
        booking_id: Uuid,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError> {
        let updated = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = $1
            WHERE id = $2 AND status = $3
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(status)
        .bind(booking_id)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }
}
