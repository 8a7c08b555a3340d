//! Booking quote service.
//!
//! Combines a tour's pricing config, its availability calendar and the
//! booking total calculator into one quote for a date and party size.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::availability::AvailabilityStore;
use crate::error::{BookingError, BookingResult};

use super::calculators::{
    compute_price_with_bookings, compute_total, PriceBreakdown, MAX_TRAVELERS, MIN_TRAVELERS,
};
use super::models::PricingConfig;

/// Where the unit price of a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Pricing engine output for the date and party
    Computed,
    /// Admin-set price on the date's availability slot
    SlotOverride,
}

/// Ephemeral quote for one booking; never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingQuote {
    pub tour_id: Uuid,
    pub date: NaiveDate,
    pub travelers: u32,
    pub unit_price: Decimal,
    pub price_source: PriceSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PriceBreakdown>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Quote a booking for `travelers` people on `date`.
///
/// # Arguments
/// * `config` - The tour's pricing config
/// * `availability` - The tour's calendar; a date without a slot is open
/// * `date` - Tour departure date
/// * `travelers` - Party size, 1 to 10
/// * `booking_count` - The tour's confirmed bookings, for `min_bookings` discounts
/// * `tax_rate` - Fraction applied to the subtotal
///
/// # Returns
/// `BookingQuote`, or a validation error when the date is blocked, full, or
/// cannot take the whole party.
pub fn quote_booking(
    config: &PricingConfig,
    availability: &AvailabilityStore,
    date: NaiveDate,
    travelers: u32,
    booking_count: u32,
    tax_rate: Decimal,
) -> BookingResult<BookingQuote> {
    if !(MIN_TRAVELERS..=MAX_TRAVELERS).contains(&travelers) {
        return Err(BookingError::validation(format!(
            "Travelers must be between {} and {}, got {}",
            MIN_TRAVELERS, MAX_TRAVELERS, travelers
        )));
    }

    let slot = availability.get_slot(date);
    if let Some(slot) = slot {
        if !slot.status.is_bookable() {
            return Err(BookingError::validation(format!(
                "{} is not bookable ({})",
                date, slot.status
            )));
        }
        if travelers > slot.remaining_spots() {
            return Err(BookingError::validation(format!(
                "Only {} spots left on {}",
                slot.remaining_spots(),
                date
            )));
        }
    }

    let (unit_price, price_source, breakdown) = match slot.and_then(|s| s.price_override()) {
        Some(price) => (price, PriceSource::SlotOverride, None),
        None => {
            let quote = compute_price_with_bookings(config, date, travelers, booking_count)?;
            (quote.unit_price, PriceSource::Computed, Some(quote.breakdown))
        }
    };

    let totals = compute_total(unit_price, travelers, tax_rate)?;
    tracing::debug!(
        "Quoted tour {} on {} for {}: {} ({:?})",
        availability.tour_id(),
        date,
        travelers,
        totals.total,
        price_source
    );

    Ok(BookingQuote {
        tour_id: availability.tour_id(),
        date,
        travelers,
        unit_price,
        price_source,
        breakdown,
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
    })
}
