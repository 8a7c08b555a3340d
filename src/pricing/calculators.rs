//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no shared state.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};

use super::models::{DiscountKind, GroupDiscount, PricingConfig, SeasonalRate};

/// Tax applied to bookings when the caller does not supply a rate
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.10);

/// Smallest party the booking widget accepts
pub const MIN_TRAVELERS: u32 = 1;

/// Largest party the booking widget accepts
pub const MAX_TRAVELERS: u32 = 10;

/// Round to specified decimal places, half-up (midpoint away from zero).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tour_booking::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1402.925), 2), dec!(1402.93));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// How the unit price was reached, step by step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub base_price: Decimal,
    pub season_id: Option<Uuid>,
    pub season_name: Option<String>,
    pub season_multiplier: Decimal,
    /// Sum of applicable percentage discounts, capped at 100
    pub percentage_discount: Decimal,
    /// Sum of applicable fixed discounts
    pub fixed_discount: Decimal,
    /// Amount taken off by promotional discounts (after the season multiplier)
    pub discount_total: Decimal,
    pub group_discount_id: Option<Uuid>,
    pub group_discount_percentage: Decimal,
    pub group_discount_amount: Decimal,
}

/// Per-person price for one date and party size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub unit_price: Decimal,
    pub breakdown: PriceBreakdown,
}

/// Order summary shown in the booking widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingTotal {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Compute the per-person price when the tour's booking count is unknown.
///
/// Discounts gated on a minimum number of bookings never apply here.
pub fn compute_price(
    config: &PricingConfig,
    date: NaiveDate,
    party_size: u32,
) -> BookingResult<PriceQuote> {
    compute_price_with_bookings(config, date, party_size, 0)
}

/// Compute the per-person price for `date` and `party_size`.
///
/// Order of application:
/// 1. Seasonal multiplier (highest matching multiplier wins)
/// 2. Percentage discounts (summed, capped at 100%)
/// 3. Fixed discounts (summed, price floored at zero)
/// 4. Group tier (largest matching percentage wins)
///
/// The result is rounded half-up to cents once, at the end.
pub fn compute_price_with_bookings(
    config: &PricingConfig,
    date: NaiveDate,
    party_size: u32,
    booking_count: u32,
) -> BookingResult<PriceQuote> {
    if party_size < MIN_TRAVELERS {
        return Err(BookingError::validation("Party size must be at least 1"));
    }
    config.validate()?;

    let season = select_season(&config.seasonal_rates, date);
    let season_multiplier = season.map(|s| s.multiplier).unwrap_or(Decimal::ONE);
    let mut unit_price = checked(config.base_price.checked_mul(season_multiplier))?;

    let mut percentage_discount = Decimal::ZERO;
    let mut fixed_discount = Decimal::ZERO;
    for discount in config
        .discounts
        .iter()
        .filter(|d| d.applies(date, booking_count))
    {
        match discount.kind {
            DiscountKind::Percentage { percent } => {
                percentage_discount = checked(percentage_discount.checked_add(percent))?
            }
            DiscountKind::Fixed { amount } => {
                fixed_discount = checked(fixed_discount.checked_add(amount))?
            }
        }
    }
    let percentage_discount = percentage_discount.min(Decimal::ONE_HUNDRED);

    let before_discounts = unit_price;
    let keep = Decimal::ONE - percentage_discount / Decimal::ONE_HUNDRED;
    unit_price = checked(unit_price.checked_mul(keep))?;
    unit_price = (unit_price - fixed_discount).max(Decimal::ZERO);
    let discount_total = before_discounts - unit_price;

    let tier = select_group_tier(&config.group_discounts, party_size);
    let group_discount_percentage = tier
        .map(|t| t.discount_percentage)
        .unwrap_or(Decimal::ZERO);
    let group_discount_amount =
        checked(unit_price.checked_mul(group_discount_percentage / Decimal::ONE_HUNDRED))?;
    unit_price -= group_discount_amount;

    Ok(PriceQuote {
        unit_price: round_money(unit_price, 2),
        breakdown: PriceBreakdown {
            base_price: config.base_price,
            season_id: season.map(|s| s.id),
            season_name: season.map(|s| s.name.clone()),
            season_multiplier,
            percentage_discount,
            fixed_discount,
            discount_total: round_money(discount_total, 2),
            group_discount_id: tier.map(|t| t.id),
            group_discount_percentage,
            group_discount_amount: round_money(group_discount_amount, 2),
        },
    })
}

/// Most expensive season wins when windows overlap; first declared on ties.
fn select_season(rates: &[SeasonalRate], date: NaiveDate) -> Option<&SeasonalRate> {
    rates
        .iter()
        .filter(|r| r.covers(date))
        .fold(None::<&SeasonalRate>, |best, rate| match best {
            Some(b) if b.multiplier >= rate.multiplier => Some(b),
            _ => Some(rate),
        })
}

/// Most favourable tier wins when tiers overlap; first declared on ties.
fn select_group_tier(tiers: &[GroupDiscount], party_size: u32) -> Option<&GroupDiscount> {
    tiers
        .iter()
        .filter(|t| t.covers(party_size))
        .fold(None::<&GroupDiscount>, |best, tier| match best {
            Some(b) if b.discount_percentage >= tier.discount_percentage => Some(b),
            _ => Some(tier),
        })
}

/// Calculate the order summary for a booking.
///
/// Tax is rounded to whole currency units, matching the totals shown on the
/// tour page. Travelers outside [`MIN_TRAVELERS`, `MAX_TRAVELERS`] are rejected,
/// not clamped.
///
/// # Arguments
/// * `unit_price` - Per-person price (usually from `compute_price`)
/// * `travelers` - Party size
/// * `tax_rate` - Fraction, e.g. `0.10` for 10%
pub fn compute_total(
    unit_price: Decimal,
    travelers: u32,
    tax_rate: Decimal,
) -> BookingResult<BookingTotal> {
    if !(MIN_TRAVELERS..=MAX_TRAVELERS).contains(&travelers) {
        return Err(BookingError::validation(format!(
            "Travelers must be between {} and {}, got {}",
            MIN_TRAVELERS, MAX_TRAVELERS, travelers
        )));
    }
    if unit_price < Decimal::ZERO {
        return Err(BookingError::validation("Unit price cannot be negative"));
    }
    if tax_rate < Decimal::ZERO {
        return Err(BookingError::validation("Tax rate cannot be negative"));
    }

    let subtotal = round_money(checked(unit_price.checked_mul(Decimal::from(travelers)))?, 2);
    let tax = round_money(checked(subtotal.checked_mul(tax_rate))?, 0);

    Ok(BookingTotal {
        subtotal,
        tax,
        total: checked(subtotal.checked_add(tax))?,
    })
}

/// Amounts beyond what `Decimal` can hold are rejected, not wrapped
fn checked(amount: Option<Decimal>) -> BookingResult<Decimal> {
    amount.ok_or_else(|| BookingError::validation("Price overflow"))
}
