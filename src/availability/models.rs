//! Availability calendar models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display status of a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Limited,
    Full,
    Blocked,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Limited => "limited",
            AvailabilityStatus::Full => "full",
            AvailabilityStatus::Blocked => "blocked",
        }
    }

    /// Whether new travelers can be added on this day
    pub fn is_bookable(&self) -> bool {
        matches!(
            self,
            AvailabilityStatus::Available | AvailabilityStatus::Limited
        )
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One calendar day's capacity and pricing record for a tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Capacity for the day
    pub available_spots: u32,
    pub booked_spots: u32,
    /// Per-person override; zero means "use the computed price"
    pub price: Decimal,
    pub status: AvailabilityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

impl AvailabilitySlot {
    /// Fresh slot for a date nobody has touched yet
    pub fn new(date: NaiveDate, capacity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            available_spots: capacity,
            booked_spots: 0,
            price: Decimal::ZERO,
            status: AvailabilityStatus::Available,
            block_reason: None,
        }
    }

    /// Spots still open for booking
    pub fn remaining_spots(&self) -> u32 {
        self.available_spots.saturating_sub(self.booked_spots)
    }

    /// Price override, if one is set
    pub fn price_override(&self) -> Option<Decimal> {
        (self.price > Decimal::ZERO).then_some(self.price)
    }
}

/// Partial update applied by `AvailabilityStore::upsert_slot`.
///
/// Absent fields leave the slot untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SlotUpdate {
    #[serde(default)]
    pub available_spots: Option<u32>,
    #[serde(default)]
    pub booked_spots: Option<u32>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub status: Option<AvailabilityStatus>,
}

impl SlotUpdate {
    pub fn spots(available_spots: u32, booked_spots: u32) -> Self {
        Self {
            available_spots: Some(available_spots),
            booked_spots: Some(booked_spots),
            ..Self::default()
        }
    }

    pub fn status(status: AvailabilityStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn price(price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn touches_spots(&self) -> bool {
        self.available_spots.is_some() || self.booked_spots.is_some()
    }
}
