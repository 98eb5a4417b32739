// src/docs.rs

use utoipa::OpenApi;

use crate::calculator;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Quotes ---
        handlers::quotes::quote_daily,
        handlers::quotes::adjust_extra_hours,
        handlers::quotes::quote_hourly,

        // --- Bookings ---
        handlers::bookings::create_daily_booking,
        handlers::bookings::create_hourly_booking,
        handlers::bookings::list_my_bookings,
        handlers::bookings::update_booking_status,

        // --- Rooms ---
        handlers::rooms::list_room_reservations,
    ),
    components(
        schemas(
            // --- Calculadoras ---
            calculator::StayQuote,
            calculator::day_stay::DayStay,
            calculator::day_stay::CheckoutAdjustment,
            calculator::hour_stay::HourStay,

            // --- Models ---
            models::booking::BookingStatus,
            models::booking::Booking,
            models::booking::ReservationInterval,

            // --- Payloads ---
            handlers::quotes::AdjustExtraHoursPayload,
            handlers::bookings::UpdateStatusPayload,
        )
    ),
    tags(
        (name = "Quotes", description = "Cálculo de duração, preço e conflitos"),
        (name = "Bookings", description = "Criação e acompanhamento de reservas"),
        (name = "Rooms", description = "Disponibilidade dos quartos")
    )
)]
pub struct ApiDoc;
