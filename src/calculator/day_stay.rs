// src/calculator/day_stay.rs

//! Calculadora de diárias.
//!
//! Uma estadia começa à meia-noite (fuso das reservas) do check-in e termina à
//! meia-noite do checkout, com no mínimo um dia. O checkout pode ser estendido
//! ou reduzido em horas inteiras (`extra_hours`, nunca negativo).

use chrono::{Days, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    calculator::{
        hours_from_minutes,
        interval::{find_conflicts, TimeWindow},
        rate::HourlyRate,
        to_utc, StayQuote,
    },
    common::error::AppError,
    models::booking::ReservationInterval,
};

const FULL_DAY_MINUTES: i64 = 24 * 60;

/// Teto aceito na borda HTTP (30 dias de horas extras).
pub const MAX_EXTRA_HOURS: u32 = 720;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayStay {
    #[schema(example = "2030-01-15")]
    pub checkin: NaiveDate,
    /// Padrão: check-in + 1 dia.
    #[serde(default)]
    #[schema(example = "2030-01-16")]
    pub checkout: Option<NaiveDate>,
    #[serde(default)]
    #[validate(range(max = MAX_EXTRA_HOURS, message = "extra_hours_range"))]
    #[schema(example = 0)]
    pub extra_hours: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutAdjustment {
    /// +1h
    Late,
    /// -1h
    Early,
}

impl DayStay {
    pub fn checkout_date(&self) -> Result<NaiveDate, AppError> {
        match self.checkout {
            Some(date) => Ok(date),
            None => self
                .checkin
                .checked_add_days(Days::new(1))
                .ok_or(AppError::InvalidCheckout),
        }
    }

    /// Janela sem horas extras: meia-noite do check-in até meia-noite do checkout.
    fn base_window(&self, tz: FixedOffset) -> Result<TimeWindow, AppError> {
        let checkout = self.checkout_date()?;
        if checkout <= self.checkin {
            return Err(AppError::InvalidCheckout);
        }
        TimeWindow::new(
            to_utc(tz, self.checkin.and_time(NaiveTime::MIN))?,
            to_utc(tz, checkout.and_time(NaiveTime::MIN))?,
        )
    }

    pub fn window(&self, tz: FixedOffset) -> Result<TimeWindow, AppError> {
        self.base_window(tz)?.extended_by_hours(self.extra_hours)
    }
}

pub fn quote(
    stay: &DayStay,
    tz: FixedOffset,
    today: NaiveDate,
    rate: HourlyRate,
    reservations: &[ReservationInterval],
) -> Result<StayQuote, AppError> {
    if stay.checkin < today {
        return Err(AppError::CheckinInPast);
    }

    let base = stay.base_window(tz)?;
    let span_minutes = base.duration_minutes();
    let mut total_hours = hours_from_minutes(span_minutes);
    // Diária simples cobra 23h. Comportamento herdado do formulário de reserva,
    // mantido até o produto decidir; só vale para exatamente 24h.
    if span_minutes == FULL_DAY_MINUTES {
        total_hours -= Decimal::ONE;
    }
    total_hours += Decimal::from(stay.extra_hours);

    let window = base.extended_by_hours(stay.extra_hours)?;

    Ok(StayQuote {
        checkin: window.start,
        checkout: window.end,
        total_hours,
        extra_hours: stay.extra_hours,
        price_per_hour: rate.per_hour(),
        total_price: rate.price_for(total_hours),
        conflicts: find_conflicts(&window, reservations),
    })
}

/// Checkout tardio / antecipado. Em caso de recusa o estado não muda.
pub fn adjust_extra_hours(
    stay: &DayStay,
    adjustment: CheckoutAdjustment,
    tz: FixedOffset,
    reservations: &[ReservationInterval],
) -> Result<DayStay, AppError> {
    match adjustment {
        CheckoutAdjustment::Late => {
            let extra_hours = stay
                .extra_hours
                .checked_add(1)
                .ok_or(AppError::InvalidCheckout)?;
            let extended = DayStay {
                extra_hours,
                ..*stay
            };
            if !find_conflicts(&extended.window(tz)?, reservations).is_empty() {
                return Err(AppError::ExtraHoursConflict);
            }
            Ok(extended)
        }
        CheckoutAdjustment::Early => {
            if stay.extra_hours == 0 {
                return Err(AppError::ExtraHoursAtMinimum);
            }
            Ok(DayStay {
                extra_hours: stay.extra_hours - 1,
                ..*stay
            })
        }
    }
}
