// src/calculator/interval.rs

use chrono::{DateTime, TimeDelta, Utc};

use crate::{common::error::AppError, models::booking::ReservationInterval};

/// Janela proposta, semiaberta `[start, end)`, sempre com `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, AppError> {
        if end <= start {
            return Err(AppError::InvalidCheckout);
        }
        Ok(Self { start, end })
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn extended_by_hours(&self, hours: u32) -> Result<Self, AppError> {
        let end = self
            .end
            .checked_add_signed(TimeDelta::hours(i64::from(hours)))
            .ok_or(AppError::InvalidCheckout)?;
        Ok(Self {
            start: self.start,
            end,
        })
    }

    // Encostar nas pontas (end == other.start) não é conflito
    pub fn overlaps(&self, other: &ReservationInterval) -> bool {
        let starts_before_other_ends = other.end.is_none_or(|end| self.start < end);
        let ends_after_other_starts = other.start.is_none_or(|start| self.end > start);
        starts_before_other_ends && ends_after_other_starts
    }
}

pub fn find_conflicts(
    window: &TimeWindow,
    reservations: &[ReservationInterval],
) -> Vec<ReservationInterval> {
    reservations
        .iter()
        .filter(|reservation| window.overlaps(reservation))
        .copied()
        .collect()
}
