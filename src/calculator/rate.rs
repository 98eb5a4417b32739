// src/calculator/rate.rs

use rust_decimal::Decimal;

use crate::common::error::AppError;

const HOURS_PER_DAY: i64 = 24;

/// Preço por hora derivado da diária: `ceil(price_per_day / 24)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyRate(Decimal);

impl HourlyRate {
    pub fn from_daily(price_per_day: Decimal) -> Result<Self, AppError> {
        if price_per_day < Decimal::ZERO {
            return Err(AppError::InvalidRate(price_per_day));
        }
        Ok(Self((price_per_day / Decimal::from(HOURS_PER_DAY)).ceil()))
    }

    pub fn per_hour(self) -> Decimal {
        self.0
    }

    pub fn price_for(self, hours: Decimal) -> Decimal {
        (hours * self.0).round_dp(2)
    }
}
