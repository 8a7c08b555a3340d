//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::{BookingTotal, PriceBreakdown};
use super::services::{BookingQuote, PriceSource};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Response for per-person price calculation
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub tour_id: Uuid,
    pub date: NaiveDate,
    pub party_size: u32,
    pub unit_price: MoneyResponse,
    pub breakdown: PriceBreakdown,
}

/// Response for booking totals
#[derive(Debug, Serialize)]
pub struct TotalResponse {
    pub travelers: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    pub subtotal: MoneyResponse,
    pub tax: MoneyResponse,
    pub total: MoneyResponse,
}

impl TotalResponse {
    pub fn new(totals: BookingTotal, travelers: u32, tax_rate: Decimal, currency: &str) -> Self {
        Self {
            travelers,
            tax_rate,
            subtotal: MoneyResponse::new(totals.subtotal, currency),
            tax: MoneyResponse::new(totals.tax, currency),
            total: MoneyResponse::new(totals.total, currency),
        }
    }
}

/// Response for a full booking quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub tour_id: Uuid,
    pub date: NaiveDate,
    pub travelers: u32,
    pub unit_price: MoneyResponse,
    pub price_source: PriceSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PriceBreakdown>,
    pub subtotal: MoneyResponse,
    pub tax: MoneyResponse,
    pub total: MoneyResponse,
}

impl QuoteResponse {
    pub fn new(quote: BookingQuote, currency: &str) -> Self {
        Self {
            tour_id: quote.tour_id,
            date: quote.date,
            travelers: quote.travelers,
            unit_price: MoneyResponse::new(quote.unit_price, currency),
            price_source: quote.price_source,
            breakdown: quote.breakdown,
            subtotal: MoneyResponse::new(quote.subtotal, currency),
            tax: MoneyResponse::new(quote.tax, currency),
            total: MoneyResponse::new(quote.total, currency),
        }
    }
}
