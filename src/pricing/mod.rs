//! Pricing engine module.
//!
//! Seasonal multipliers, promotional discounts and group tiers are applied
//! to a tour's base price, then combined with travelers and tax into a quote.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    compute_price, compute_price_with_bookings, compute_total, round_money, BookingTotal,
    PriceBreakdown, PriceQuote, DEFAULT_TAX_RATE, MAX_TRAVELERS, MIN_TRAVELERS,
};
pub use models::{Discount, DiscountKind, GroupDiscount, PricingConfig, SeasonalRate};
pub use routes::router;
pub use services::{quote_booking, BookingQuote, PriceSource};
