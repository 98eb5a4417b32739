// src/calculator/hour_stay.rs

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::Deserialize;
use utoipa::ToSchema;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourStay {
    #[schema(example = "2030-01-15")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:00:00")]
    pub checkin: NaiveTime,
    #[schema(value_type = String, example = "16:00:00")]
    pub checkout: NaiveTime,
    /// Permite que o checkout caia no dia seguinte ao check-in.
    #[serde(default)]
    pub overnight: bool,
}

/// Transição do checkout conforme a flag de pernoite.
///
/// Ligada: checkout no mesmo dia do check-in vai para o dia seguinte (mesmo horário).
/// Desligada: checkout em dia posterior volta para o dia do check-in e, se ficar
/// antes ou igual ao check-in, vira check-in + 1h.
pub fn resolve_checkout(
    overnight: bool,
    checkin: NaiveDateTime,
    checkout: NaiveDateTime,
) -> Result<NaiveDateTime, AppError> {
    if overnight {
        if checkout.date() <= checkin.date() {
            return checkin
                .date()
                .and_time(checkout.time())
                .checked_add_signed(TimeDelta::days(1))
                .ok_or(AppError::InvalidCheckout);
        }
        return Ok(checkout);
    }

    let same_day = if checkout.date() > checkin.date() {
        checkin.date().and_time(checkout.time())
    } else {
        checkout
    };

    if same_day <= checkin {
        checkin
            .checked_add_signed(TimeDelta::hours(1))
            .ok_or(AppError::InvalidCheckout)
    } else {
        Ok(same_day)
    }
}

fn truncate_to_minute(moment: NaiveDateTime) -> NaiveDateTime {
    moment
        .with_second(0)
        .and_then(|m| m.with_nanosecond(0))
        .unwrap_or(moment)
}

/// Janela efetiva da estadia, já com check-in ajustado e checkout resolvido.
pub fn resolve_window(
    stay: &HourStay,
    tz: FixedOffset,
    now: NaiveDateTime,
) -> Result<TimeWindow, AppError> {
    let today = now.date();
    if stay.date < today {
        return Err(AppError::CheckinInPast);
    }

    let mut checkin = stay.date.and_time(stay.checkin);
    if stay.date == today && checkin < now {
        checkin = truncate_to_minute(now);
    }

    let checkout = resolve_checkout(stay.overnight, checkin, stay.date.and_time(stay.checkout))?;

    TimeWindow::new(to_utc(tz, checkin)?, to_utc(tz, checkout)?)
}

/// `now` é o horário local no fuso das reservas.
pub fn quote(
    stay: &HourStay,
    tz: FixedOffset,
    now: NaiveDateTime,
    rate: HourlyRate,
    reservations: &[ReservationInterval],
) -> Result<StayQuote, AppError> {
    let window = resolve_window(stay, tz, now)?;
    let total_hours = hours_from_minutes(window.duration_minutes());

    Ok(StayQuote {
        checkin: window.start,
        checkout: window.end,
        total_hours,
        extra_hours: 0,
        price_per_hour: rate.per_hour(),
        total_price: rate.price_for(total_hours),
        conflicts: find_conflicts(&window, reservations),
    })
}
