//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Request to price one person on a date
#[derive(Debug, Deserialize)]
pub struct CalculatePriceRequest {
    pub date: NaiveDate,
    #[serde(default = "default_party_size")]
    pub party_size: u32,
}

fn default_party_size() -> u32 {
    1
}

/// Request to quote a full booking for a tour
#[derive(Debug, Deserialize)]
pub struct QuoteBookingRequest {
    pub date: NaiveDate,
    pub travelers: u32,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub tax_rate: Option<Decimal>,
}

/// Request to total an already-known unit price
#[derive(Debug, Deserialize)]
pub struct CalculateTotalRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub travelers: u32,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub tax_rate: Option<Decimal>,
}
