// src/calculator.rs

pub mod day_stay;
pub mod hour_stay;
pub mod interval;
pub mod rate;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    calculator::interval::TimeWindow,
    common::error::AppError,
    models::booking::ReservationInterval,
};

const MINUTES_PER_HOUR: i64 = 60;

// Resultado de qualquer uma das calculadoras (diária ou por hora)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StayQuote {
    pub checkin: DateTime<Utc>,
    pub checkout: DateTime<Utc>,
    #[schema(example = "23")]
    pub total_hours: Decimal,
    #[schema(example = 0)]
    pub extra_hours: u32,
    #[schema(example = "10")]
    pub price_per_hour: Decimal,
    #[schema(example = "230.00")]
    pub total_price: Decimal,
    pub conflicts: Vec<ReservationInterval>,
}

impl StayQuote {
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.checkin,
            end: self.checkout,
        }
    }

    /// Mesma trava do formulário: sem conflito e com total > 0.
    pub fn ensure_bookable(&self) -> Result<(), AppError> {
        if !self.conflicts.is_empty() {
            return Err(AppError::BookingConflict(self.conflicts.clone()));
        }
        if self.total_price.is_zero() {
            return Err(AppError::ZeroPrice);
        }
        Ok(())
    }
}

/// Horário local (no fuso das reservas) para UTC.
pub fn to_utc(tz: FixedOffset, local: NaiveDateTime) -> Result<DateTime<Utc>, AppError> {
    local
        .checked_sub_signed(TimeDelta::seconds(i64::from(tz.local_minus_utc())))
        .map(|utc| utc.and_utc())
        .ok_or(AppError::InvalidCheckout)
}

pub fn to_local(tz: FixedOffset, instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

pub fn hours_from_minutes(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)
}
