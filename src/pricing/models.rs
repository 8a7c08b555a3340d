//! Pricing configuration models.
//!
//! A `PricingConfig` belongs to exactly one tour and carries the base price
//! plus the seasonal, promotional and group rules layered on top of it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};

/// Time-bounded multiplier applied to the base price (e.g. "Peak Season" x1.2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalRate {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    pub multiplier: Decimal,
}

impl SeasonalRate {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        multiplier: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            end_date,
            multiplier,
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn validate(&self) -> BookingResult<()> {
        if self.end_date < self.start_date {
            return Err(BookingError::validation(format!(
                "Seasonal rate '{}' ends before it starts",
                self.name
            )));
        }
        if self.multiplier <= Decimal::ZERO {
            return Err(BookingError::validation(format!(
                "Seasonal rate '{}' multiplier must be positive",
                self.name
            )));
        }
        Ok(())
    }
}

/// What a discount takes off: a share of the price or a flat amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage in [0, 100]
    Percentage { percent: Decimal },
    /// Currency amount per person
    Fixed { amount: Decimal },
}

/// Promotional discount valid over a date window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub kind: DiscountKind,
    pub valid_from: NaiveDate,
    /// Inclusive
    pub valid_to: NaiveDate,
    /// Tour must already have at least this many bookings for the discount to apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bookings: Option<u32>,
}

impl Discount {
    pub fn percentage(
        name: impl Into<String>,
        percent: Decimal,
        valid_from: NaiveDate,
        valid_to: NaiveDate,
    ) -> Self {
        Self::with_kind(name, DiscountKind::Percentage { percent }, valid_from, valid_to)
    }

    pub fn fixed(
        name: impl Into<String>,
        amount: Decimal,
        valid_from: NaiveDate,
        valid_to: NaiveDate,
    ) -> Self {
        Self::with_kind(name, DiscountKind::Fixed { amount }, valid_from, valid_to)
    }

    fn with_kind(
        name: impl Into<String>,
        kind: DiscountKind,
        valid_from: NaiveDate,
        valid_to: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            valid_from,
            valid_to,
            min_bookings: None,
        }
    }

    pub fn with_min_bookings(mut self, min_bookings: u32) -> Self {
        self.min_bookings = Some(min_bookings);
        self
    }

    /// Check if the discount applies on `date` given the tour's booking count
    pub fn applies(&self, date: NaiveDate, booking_count: u32) -> bool {
        if date < self.valid_from || date > self.valid_to {
            return false;
        }
        match self.min_bookings {
            Some(min) => booking_count >= min,
            None => true,
        }
    }

    pub fn validate(&self) -> BookingResult<()> {
        if self.valid_to < self.valid_from {
            return Err(BookingError::validation(format!(
                "Discount '{}' ends before it starts",
                self.name
            )));
        }
        match self.kind {
            DiscountKind::Percentage { percent } => {
                if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
                    return Err(BookingError::validation(format!(
                        "Discount '{}' percentage must be between 0 and 100",
                        self.name
                    )));
                }
            }
            DiscountKind::Fixed { amount } => {
                if amount < Decimal::ZERO {
                    return Err(BookingError::validation(format!(
                        "Discount '{}' amount cannot be negative",
                        self.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Party-size tier with a percentage reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDiscount {
    pub id: Uuid,
    pub min_size: u32,
    /// Inclusive
    pub max_size: u32,
    pub discount_percentage: Decimal,
}

impl GroupDiscount {
    pub fn new(min_size: u32, max_size: u32, discount_percentage: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            min_size,
            max_size,
            discount_percentage,
        }
    }

    pub fn covers(&self, party_size: u32) -> bool {
        self.min_size <= party_size && party_size <= self.max_size
    }

    pub fn validate(&self) -> BookingResult<()> {
        if self.min_size > self.max_size {
            return Err(BookingError::validation(format!(
                "Group tier {}-{} has min size above max size",
                self.min_size, self.max_size
            )));
        }
        if self.discount_percentage < Decimal::ZERO
            || self.discount_percentage > Decimal::ONE_HUNDRED
        {
            return Err(BookingError::validation(format!(
                "Group tier {}-{} percentage must be between 0 and 100",
                self.min_size, self.max_size
            )));
        }
        Ok(())
    }
}

/// Full pricing setup for one tour
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    pub base_price: Decimal,
    #[serde(default)]
    pub seasonal_rates: Vec<SeasonalRate>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    #[serde(default)]
    pub group_discounts: Vec<GroupDiscount>,
}

impl PricingConfig {
    pub fn new(base_price: Decimal) -> Self {
        Self {
            base_price,
            ..Self::default()
        }
    }

    /// Validate every rule; the first problem found is reported.
    pub fn validate(&self) -> BookingResult<()> {
        if self.base_price < Decimal::ZERO {
            return Err(BookingError::validation("Base price cannot be negative"));
        }
        for rate in &self.seasonal_rates {
            rate.validate()?;
        }
        for discount in &self.discounts {
            discount.validate()?;
        }
        for tier in &self.group_discounts {
            tier.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seasonal_rate_covers_inclusive_bounds() {
        let rate = SeasonalRate::new("Peak", date(2025, 6, 1), date(2025, 8, 31), dec!(1.2));
        assert!(rate.covers(date(2025, 6, 1)));
        assert!(rate.covers(date(2025, 8, 31)));
        assert!(!rate.covers(date(2025, 5, 31)));
        assert!(!rate.covers(date(2025, 9, 1)));
    }

    #[test]
    fn test_seasonal_rate_rejects_inverted_range() {
        let rate = SeasonalRate::new("Broken", date(2025, 9, 1), date(2025, 8, 1), dec!(1.1));
        assert!(matches!(rate.validate(), Err(BookingError::Validation(_))));
    }

    #[test]
    fn test_seasonal_rate_rejects_non_positive_multiplier() {
        let rate = SeasonalRate::new("Free", date(2025, 1, 1), date(2025, 1, 31), dec!(0));
        assert!(rate.validate().is_err());
    }

    #[test]
    fn test_discount_min_bookings_threshold() {
        let discount = Discount::percentage("Loyalty", dec!(5), date(2025, 1, 1), date(2025, 12, 31))
            .with_min_bookings(3);
        assert!(!discount.applies(date(2025, 3, 1), 0));
        assert!(!discount.applies(date(2025, 3, 1), 2));
        assert!(discount.applies(date(2025, 3, 1), 3));
        assert!(!discount.applies(date(2026, 1, 1), 10));
    }

    #[test]
    fn test_discount_validation() {
        let too_big = Discount::percentage("Too big", dec!(150), date(2025, 1, 1), date(2025, 1, 2));
        assert!(too_big.validate().is_err());

        let negative = Discount::fixed("Negative", dec!(-10), date(2025, 1, 1), date(2025, 1, 2));
        assert!(negative.validate().is_err());

        let ok = Discount::fixed("Early bird", dec!(50), date(2025, 1, 1), date(2025, 1, 2));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_group_discount_rejects_min_above_max() {
        let tier = GroupDiscount::new(6, 4, dec!(10));
        assert!(tier.validate().is_err());
        assert!(GroupDiscount::new(4, 6, dec!(10)).validate().is_ok());
    }

    #[test]
    fn test_pricing_config_rejects_negative_base_price() {
        let config = PricingConfig::new(dec!(-1));
        assert_eq!(
            config.validate(),
            Err(BookingError::validation("Base price cannot be negative"))
        );
    }

    #[test]
    fn test_discount_serializes_as_tagged_variant() {
        let discount = Discount::percentage("Spring", dec!(10), date(2025, 3, 1), date(2025, 3, 31));
        let json = serde_json::to_value(&discount).unwrap();
        assert_eq!(json["type"], "percentage");
        assert_eq!(json["valid_from"], "2025-03-01");
        assert!(json.get("min_bookings").is_none());

        let back: Discount = serde_json::from_value(json).unwrap();
        assert_eq!(back, discount);
    }
}
