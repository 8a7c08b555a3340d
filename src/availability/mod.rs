//! Availability calendar for tours.
//!
//! One `AvailabilityStore` per tour maps calendar days to slots carrying
//! capacity, bookings, an optional price override and a display status.

pub mod models;
pub mod routes;
pub mod store;

pub use models::{AvailabilitySlot, AvailabilityStatus, SlotUpdate};
pub use routes::router;
pub use store::{derive_status, AvailabilityStore};
