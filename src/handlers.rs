pub mod bookings;
pub mod quotes;
pub mod rooms;
