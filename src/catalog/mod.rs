//! Tour catalog: listings, tour admin, itinerary, media records and analytics.
//!
//! The data is mocked in memory and seeded with sample tours.

pub mod models;
pub mod routes;
pub mod seed;
pub mod store;

pub use models::{
    CatalogAnalytics, ItineraryDay, ItineraryDayUpdate, NewItineraryDay, NewTour, Tour,
    TourBookings, TourFilter, TourImage, TourSummary, TourUpdate,
};
pub use routes::router;
pub use store::TourCatalog;

