// src/services/booking_service.rs

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

use crate::{
    calculator::{
        day_stay::{self, CheckoutAdjustment, DayStay},
        hour_stay::{self, HourStay},
        rate::HourlyRate,
        to_local, StayQuote,
    },
    common::error::AppError,
    db::BookingRepository,
    models::booking::{Booking, BookingStatus, NewBooking, ReservationInterval},
};

#[derive(Clone)]
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    // Fuso em que "dia" e "meia-noite" são interpretados
    tz: FixedOffset,
}

// Tudo que as calculadoras precisam saber sobre o quarto
struct RoomContext {
    rate: HourlyRate,
    reservations: Vec<ReservationInterval>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>, tz: FixedOffset) -> Self {
        Self { repo, tz }
    }

    async fn room_context(&self, room_id: Uuid) -> Result<RoomContext, AppError> {
        let room = self
            .repo
            .find_room(room_id)
            .await?
            .ok_or(AppError::RoomNotFound(room_id))?;
        let rate = HourlyRate::from_daily(room.price_per_day)?;
        let reservations = self.repo.reservations_for_room(room_id).await?;

        Ok(RoomContext { rate, reservations })
    }

    // --- COTAÇÕES ---

    pub async fn quote_daily(
        &self,
        room_id: Uuid,
        stay: &DayStay,
        now: DateTime<Utc>,
    ) -> Result<StayQuote, AppError> {
        let ctx = self.room_context(room_id).await?;
        let today = to_local(self.tz, now).date();
        day_stay::quote(stay, self.tz, today, ctx.rate, &ctx.reservations)
    }

    /// Aplica checkout tardio/antecipado e devolve a nova cotação.
    pub async fn adjust_extra_hours(
        &self,
        room_id: Uuid,
        stay: &DayStay,
        adjustment: CheckoutAdjustment,
        now: DateTime<Utc>,
    ) -> Result<StayQuote, AppError> {
        let ctx = self.room_context(room_id).await?;
        let today = to_local(self.tz, now).date();
        let adjusted = day_stay::adjust_extra_hours(stay, adjustment, self.tz, &ctx.reservations)?;
        day_stay::quote(&adjusted, self.tz, today, ctx.rate, &ctx.reservations)
    }

    pub async fn quote_hourly(
        &self,
        room_id: Uuid,
        stay: &HourStay,
        now: DateTime<Utc>,
    ) -> Result<StayQuote, AppError> {
        let ctx = self.room_context(room_id).await?;
        hour_stay::quote(stay, self.tz, to_local(self.tz, now), ctx.rate, &ctx.reservations)
    }

    // --- RESERVAS ---

    pub async fn book_daily(
        &self,
        room_id: Uuid,
        tenant_id: Uuid,
        stay: &DayStay,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        let quote = self.quote_daily(room_id, stay, now).await?;
        self.submit(room_id, tenant_id, quote).await
    }

    pub async fn book_hourly(
        &self,
        room_id: Uuid,
        tenant_id: Uuid,
        stay: &HourStay,
        now: DateTime<Utc>,
    ) -> Result<Booking, AppError> {
        let quote = self.quote_hourly(room_id, stay, now).await?;
        self.submit(room_id, tenant_id, quote).await
    }

    async fn submit(
        &self,
        room_id: Uuid,
        tenant_id: Uuid,
        quote: StayQuote,
    ) -> Result<Booking, AppError> {
        quote.ensure_bookable()?;

        let window = quote.window();
        let new_booking = NewBooking {
            room_id,
            tenant_id,
            start_time: window.start,
            end_time: window.end,
            total_price: quote.total_price,
        };

        match self.repo.create_booking(new_booking).await {
            Ok(booking) => {
                tracing::info!(
                    booking_id = %booking.id,
                    room_id = %room_id,
                    total = %booking.total_price,
                    "📅 Reserva criada como pending"
                );
                Ok(booking)
            }
            // Outra reserva entrou entre a cotação e a inserção
            Err(AppError::BookingConflict(conflicts)) => {
                tracing::warn!(room_id = %room_id, "Conflito detectado na inserção da reserva");
                Err(AppError::BookingConflict(conflicts))
            }
            Err(e) => {
                tracing::error!("🔥 Falha ao registrar reserva do quarto {}: {}", room_id, e);
                Err(AppError::BookingFailed)
            }
        }
    }

    // --- CONSULTAS ---

    pub async fn room_reservations(
        &self,
        room_id: Uuid,
    ) -> Result<Vec<ReservationInterval>, AppError> {
        if self.repo.find_room(room_id).await?.is_none() {
            return Err(AppError::RoomNotFound(room_id));
        }
        self.repo.reservations_for_room(room_id).await
    }

    pub async fn tenant_history(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, AppError> {
        self.repo.list_by_tenant(tenant_id, limit, offset).await
    }

    // --- TRANSIÇÃO ---

    pub async fn update_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let current = self
            .repo
            .find_booking(booking_id)
            .await?
            .ok_or(AppError::BookingNotFound(booking_id))?;

        if !current.status.can_transition_to(status) {
            return Err(AppError::InvalidStatusTransition {
                from: current.status,
                to: status,
            });
        }

        // Condicional ao status lido: se outro pedido mudou antes, relê e recusa
        let Some(updated) = self
            .repo
            .update_status(booking_id, current.status, status)
            .await?
        else {
            let latest = self
                .repo
                .find_booking(booking_id)
                .await?
                .ok_or(AppError::BookingNotFound(booking_id))?;
            tracing::warn!(booking_id = %booking_id, seen = ?current.status, now = ?latest.status, "Status mudou durante a transição");
            return Err(AppError::InvalidStatusTransition {
                from: latest.status,
                to: status,
            });
        };

        tracing::info!(booking_id = %booking_id, from = ?current.status, to = ?status, "Status da reserva alterado");
        Ok(updated)
    }
}
