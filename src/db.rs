pub mod booking_repo;
pub use booking_repo::{BookingRepository, PgBookingRepository};

#[cfg(test)]
pub mod memory_repo;
#[cfg(test)]
pub use memory_repo::MemoryBookingRepository;
