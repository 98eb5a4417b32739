// src/db/memory_repo.rs

// Repositório em memória para os testes do serviço e dos handlers.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use crate::{
    calculator::interval::find_conflicts,
    calculator::interval::TimeWindow,
    common::error::AppError,
    db::BookingRepository,
    models::{
        booking::{Booking, BookingStatus, NewBooking, ReservationInterval},
        room::Room,
    },
};

#[derive(Default)]
pub struct MemoryBookingRepository {
    rooms: Mutex<Vec<Room>>,
    bookings: Mutex<Vec<Booking>>,
    fail_inserts: Mutex<bool>,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&self, room: Room) {
        self.rooms.lock().unwrap().push(room);
    }

    /// Simula o backend recusando a inserção.
    pub fn fail_inserts(&self) {
        *self.fail_inserts.lock().unwrap() = true;
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn find_room(&self, room_id: Uuid) -> Result<Option<Room>, AppError> {
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == room_id)
            .cloned())
    }

    async fn reservations_for_room(
        &self,
        room_id: Uuid,
    ) -> Result<Vec<ReservationInterval>, AppError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.room_id == room_id && b.status.blocks_room())
            .map(Booking::interval)
            .collect())
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, AppError> {
        if *self.fail_inserts.lock().unwrap() {
            return Err(AppError::InternalServerError(anyhow::anyhow!(
                "insert rejected"
            )));
        }

        let mut bookings = self.bookings.lock().unwrap();
        let window = TimeWindow::new(booking.start_time, booking.end_time)?;
        let blocking: Vec<ReservationInterval> = bookings
            .iter()
            .filter(|b| b.room_id == booking.room_id && b.status.blocks_room())
            .map(Booking::interval)
            .collect();
        let conflicts = find_conflicts(&window, &blocking);
        if !conflicts.is_empty() {
            return Err(AppError::BookingConflict(conflicts));
        }

        // created_at crescente para a ordenação do histórico ser estável
        let created = Booking {
            id: Uuid::new_v4(),
            room_id: booking.room_id,
            tenant_id: booking.tenant_id,
            start_time: Some(booking.start_time),
            end_time: Some(booking.end_time),
            total_price: booking.total_price,
            status: BookingStatus::Pending,
            created_at: Utc::now() + TimeDelta::milliseconds(bookings.len() as i64),
        };
        bookings.push(created.clone());
        Ok(created)
    }

    async fn find_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, AppError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == booking_id)
            .cloned())
    }

    async fn list_by_tenant(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, AppError> {
        let mut mine: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.tenant_id == tenant_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(mine
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn update_status(
        &self,
        booking_id: Uuid,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError> {
        let mut bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .iter_mut()
            .find(|b| b.id == booking_id && b.status == expected)
            .map(|booking| {
                booking.status = status;
                booking.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    async fn pending_booking(repo: &MemoryBookingRepository) -> Booking {
        let start = Utc::now() + TimeDelta::days(1);
        repo.create_booking(NewBooking {
            room_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            start_time: start,
            end_time: start + TimeDelta::hours(2),
            total_price: Decimal::from(20),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn status_update_with_stale_expectation_changes_nothing() {
        let repo = MemoryBookingRepository::new();
        let booking = pending_booking(&repo).await;

        let cancelled = repo
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(cancelled.map(|b| b.status), Some(BookingStatus::Cancelled));

        // o segundo pedido ainda acha que a reserva está pending
        let late_confirm = repo
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Confirmed)
            .await
            .unwrap();

        assert!(late_confirm.is_none());
        assert_eq!(repo.bookings()[0].status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn status_update_on_unknown_booking_is_none() {
        let repo = MemoryBookingRepository::new();

        let result = repo
            .update_status(Uuid::new_v4(), BookingStatus::Pending, BookingStatus::Confirmed)
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
