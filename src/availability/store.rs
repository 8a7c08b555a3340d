//! Per-tour availability calendar.
//!
//! Slots are created lazily the first time an admin touches a date. Status
//! changes only through `upsert_slot` and `block_date`; nothing here moves
//! with the clock.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};

use super::models::{AvailabilitySlot, AvailabilityStatus, SlotUpdate};

/// Occupancy at or above this share of capacity shows as "limited" (4/5 = 80%)
const LIMITED_NUMERATOR: u64 = 4;
const LIMITED_DENOMINATOR: u64 = 5;

/// Derive a slot's display status from its spot counts.
///
/// Blocked slots stay blocked; only an explicit status change lifts a block.
pub fn derive_status(slot: &AvailabilitySlot) -> AvailabilityStatus {
    if slot.status == AvailabilityStatus::Blocked {
        return AvailabilityStatus::Blocked;
    }
    status_for_spots(slot.available_spots, slot.booked_spots)
}

fn status_for_spots(available: u32, booked: u32) -> AvailabilityStatus {
    if booked >= available {
        return AvailabilityStatus::Full;
    }
    let (available, booked) = (u64::from(available), u64::from(booked));
    if booked * LIMITED_DENOMINATOR >= available * LIMITED_NUMERATOR {
        AvailabilityStatus::Limited
    } else {
        AvailabilityStatus::Available
    }
}

/// In-memory availability calendar for a single tour
#[derive(Debug, Clone)]
pub struct AvailabilityStore {
    tour_id: Uuid,
    /// Capacity given to newly created slots
    default_capacity: u32,
    slots: BTreeMap<NaiveDate, AvailabilitySlot>,
}

impl AvailabilityStore {
    pub fn new(tour_id: Uuid, default_capacity: u32) -> Self {
        Self {
            tour_id,
            default_capacity,
            slots: BTreeMap::new(),
        }
    }

    pub fn tour_id(&self) -> Uuid {
        self.tour_id
    }

    pub fn default_capacity(&self) -> u32 {
        self.default_capacity
    }

    /// Capacity for slots created from now on; existing slots keep theirs
    pub fn set_default_capacity(&mut self, capacity: u32) {
        self.default_capacity = capacity;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get_slot(&self, date: NaiveDate) -> Option<&AvailabilitySlot> {
        self.slots.get(&date)
    }

    /// Look up a slot the caller expects to exist
    pub fn require_slot(&self, date: NaiveDate) -> BookingResult<&AvailabilitySlot> {
        self.get_slot(date).ok_or_else(|| {
            BookingError::not_found(format!(
                "No availability slot for tour {} on {}",
                self.tour_id, date
            ))
        })
    }

    /// Slots between `from` and `to` inclusive, in date order
    pub fn slots_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Iterator<Item = &AvailabilitySlot> {
        // BTreeMap::range panics on an inverted range
        let range = if from <= to { Some(from..=to) } else { None };
        range
            .into_iter()
            .flat_map(move |r| self.slots.range(r).map(|(_, slot)| slot))
    }

    /// Create the slot for `date` if needed, then merge `update` into it.
    ///
    /// An explicit status in the update always wins. Without one, changing
    /// either spot count re-derives the status (a blocked day stays blocked).
    pub fn upsert_slot(
        &mut self,
        date: NaiveDate,
        update: SlotUpdate,
    ) -> BookingResult<AvailabilitySlot> {
        if let Some(price) = update.price {
            if price < Decimal::ZERO {
                return Err(BookingError::validation("Slot price cannot be negative"));
            }
        }

        let default_capacity = self.default_capacity;
        let slot = self.slots.entry(date).or_insert_with(|| {
            debug!("Creating availability slot for {}", date);
            AvailabilitySlot::new(date, default_capacity)
        });

        if let Some(available) = update.available_spots {
            slot.available_spots = available;
        }
        if let Some(booked) = update.booked_spots {
            slot.booked_spots = booked;
        }
        if let Some(price) = update.price {
            slot.price = price;
        }

        match update.status {
            Some(status) => {
                slot.status = status;
                if status != AvailabilityStatus::Blocked {
                    slot.block_reason = None;
                }
            }
            None if update.touches_spots() => slot.status = derive_status(slot),
            None => {}
        }

        debug!(
            "Upserted slot {}: {}/{} booked, status {}",
            date, slot.booked_spots, slot.available_spots, slot.status
        );
        Ok(slot.clone())
    }

    /// Close a date to bookings, whatever its current state.
    ///
    /// Blocking twice leaves the same slot apart from the reason text.
    pub fn block_date(&mut self, date: NaiveDate, reason: Option<String>) -> AvailabilitySlot {
        let default_capacity = self.default_capacity;
        let slot = self
            .slots
            .entry(date)
            .or_insert_with(|| AvailabilitySlot::new(date, default_capacity));

        slot.status = AvailabilityStatus::Blocked;
        slot.available_spots = 0;
        slot.booked_spots = 0;
        slot.block_reason = reason.filter(|r| !r.trim().is_empty());

        debug!("Blocked {} for tour {}", date, self.tour_id);
        slot.clone()
    }

    /// Block several dates with the same reason
    pub fn block_dates(
        &mut self,
        dates: &[NaiveDate],
        reason: Option<String>,
    ) -> Vec<AvailabilitySlot> {
        dates
            .iter()
            .map(|date| self.block_date(*date, reason.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> AvailabilityStore {
        AvailabilityStore::new(Uuid::new_v4(), 12)
    }

    // ==================== derive_status tests ====================

    #[test]
    fn test_derive_status_thresholds() {
        assert_eq!(status_for_spots(10, 0), AvailabilityStatus::Available);
        assert_eq!(status_for_spots(10, 7), AvailabilityStatus::Available);
        assert_eq!(status_for_spots(10, 8), AvailabilityStatus::Limited);
        assert_eq!(status_for_spots(10, 9), AvailabilityStatus::Limited);
        assert_eq!(status_for_spots(10, 10), AvailabilityStatus::Full);
        assert_eq!(status_for_spots(10, 12), AvailabilityStatus::Full);
        assert_eq!(status_for_spots(0, 0), AvailabilityStatus::Full);
    }

    #[test]
    fn test_derive_status_keeps_blocked() {
        let mut slot = AvailabilitySlot::new(date(2025, 8, 15), 10);
        slot.status = AvailabilityStatus::Blocked;
        slot.available_spots = 10;
        slot.booked_spots = 1;
        assert_eq!(derive_status(&slot), AvailabilityStatus::Blocked);
    }

    // ==================== upsert_slot tests ====================

    #[test]
    fn test_upsert_creates_slot_with_defaults() {
        let mut store = store();
        let slot = store.upsert_slot(date(2025, 8, 1), SlotUpdate::default()).unwrap();

        assert_eq!(slot.available_spots, 12);
        assert_eq!(slot.booked_spots, 0);
        assert_eq!(slot.price, Decimal::ZERO);
        assert_eq!(slot.status, AvailabilityStatus::Available);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_new_default_capacity_only_affects_new_slots() {
        let mut store = store();
        store.upsert_slot(date(2025, 8, 1), SlotUpdate::default()).unwrap();
        store.set_default_capacity(20);

        let fresh = store.upsert_slot(date(2025, 8, 2), SlotUpdate::default()).unwrap();
        assert_eq!(fresh.available_spots, 20);
        assert_eq!(store.get_slot(date(2025, 8, 1)).unwrap().available_spots, 12);
    }

    #[test]
    fn test_upsert_spots_derives_limited_at_eighty_percent() {
        let mut store = store();
        let d = date(2025, 8, 1);
        store.upsert_slot(d, SlotUpdate::spots(10, 8)).unwrap();

        let slot = store.get_slot(d).unwrap();
        assert_eq!(derive_status(slot), AvailabilityStatus::Limited);
        assert_eq!(slot.status, AvailabilityStatus::Limited);
    }

    #[test]
    fn test_upsert_merges_into_existing_slot() {
        let mut store = store();
        let d = date(2025, 8, 1);
        let created = store.upsert_slot(d, SlotUpdate::spots(10, 2)).unwrap();
        let updated = store.upsert_slot(d, SlotUpdate::price(dec!(1099))).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.available_spots, 10);
        assert_eq!(updated.booked_spots, 2);
        assert_eq!(updated.price, dec!(1099));
    }

    #[test]
    fn test_explicit_status_wins_until_spots_change() {
        let mut store = store();
        let d = date(2025, 8, 1);
        store.upsert_slot(d, SlotUpdate::spots(10, 1)).unwrap();

        let slot = store
            .upsert_slot(d, SlotUpdate::status(AvailabilityStatus::Full))
            .unwrap();
        assert_eq!(slot.status, AvailabilityStatus::Full);

        // price-only edit keeps the explicit status
        let slot = store.upsert_slot(d, SlotUpdate::price(dec!(50))).unwrap();
        assert_eq!(slot.status, AvailabilityStatus::Full);

        let slot = store
            .upsert_slot(
                d,
                SlotUpdate {
                    booked_spots: Some(2),
                    ..SlotUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(slot.status, AvailabilityStatus::Available);
    }

    #[test]
    fn test_upsert_with_spots_and_status_uses_status() {
        let mut store = store();
        let slot = store
            .upsert_slot(
                date(2025, 8, 2),
                SlotUpdate {
                    available_spots: Some(10),
                    booked_spots: Some(1),
                    status: Some(AvailabilityStatus::Limited),
                    ..SlotUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(slot.status, AvailabilityStatus::Limited);
    }

    #[test]
    fn test_upsert_rejects_negative_price_without_creating() {
        let mut store = store();
        let result = store.upsert_slot(date(2025, 8, 3), SlotUpdate::price(dec!(-5)));

        assert!(matches!(result, Err(BookingError::Validation(_))));
        assert!(store.is_empty());
    }

    // ==================== block_date tests ====================

    #[test]
    fn test_block_date_sets_blocked_and_zeroes_spots() {
        let mut store = store();
        let d = date(2025, 8, 15);
        store.upsert_slot(d, SlotUpdate::spots(10, 4)).unwrap();
        store.block_date(d, Some("maintenance".to_string()));

        let slot = store.get_slot(d).unwrap();
        assert_eq!(slot.status, AvailabilityStatus::Blocked);
        assert_eq!(slot.available_spots, 0);
        assert_eq!(slot.booked_spots, 0);
        assert_eq!(slot.block_reason.as_deref(), Some("maintenance"));
    }

    #[test]
    fn test_block_date_creates_missing_slot() {
        let mut store = store();
        let slot = store.block_date(date(2025, 8, 15), Some("maintenance".to_string()));
        assert_eq!(slot.status, AvailabilityStatus::Blocked);
        assert_eq!(slot.available_spots, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_block_date_is_idempotent() {
        let mut store = store();
        let d = date(2025, 8, 15);
        let first = store.block_date(d, Some("storm".to_string()));
        let second = store.block_date(d, Some("storm, again".to_string()));

        assert_eq!(first.id, second.id);
        assert_eq!(first.status, second.status);
        assert_eq!(first.available_spots, second.available_spots);
        assert_eq!(first.booked_spots, second.booked_spots);
        assert_eq!(first.price, second.price);
        assert_eq!(second.block_reason.as_deref(), Some("storm, again"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_blocked_survives_spot_edit_until_explicit_status() {
        let mut store = store();
        let d = date(2025, 8, 15);
        store.block_date(d, None);

        let slot = store.upsert_slot(d, SlotUpdate::spots(10, 0)).unwrap();
        assert_eq!(slot.status, AvailabilityStatus::Blocked);

        let slot = store
            .upsert_slot(d, SlotUpdate::status(AvailabilityStatus::Available))
            .unwrap();
        assert_eq!(slot.status, AvailabilityStatus::Available);
        assert_eq!(slot.available_spots, 10);
        assert!(slot.block_reason.is_none());
    }

    #[test]
    fn test_block_dates_blocks_each() {
        let mut store = store();
        let dates = [date(2025, 12, 24), date(2025, 12, 25), date(2025, 12, 31)];
        let slots = store.block_dates(&dates, Some("holiday".to_string()));

        assert_eq!(slots.len(), 3);
        assert!(dates
            .iter()
            .all(|d| store.get_slot(*d).unwrap().status == AvailabilityStatus::Blocked));
    }

    // ==================== lookup tests ====================

    #[test]
    fn test_require_slot_not_found() {
        let store = store();
        let result = store.require_slot(date(2025, 1, 1));
        assert!(matches!(result, Err(BookingError::NotFound(_))));
    }

    #[test]
    fn test_slots_between_is_inclusive_and_ordered() {
        let mut store = store();
        for day in [20, 5, 1, 31, 15] {
            store
                .upsert_slot(date(2025, 7, day), SlotUpdate::default())
                .unwrap();
        }
        store.upsert_slot(date(2025, 8, 1), SlotUpdate::default()).unwrap();

        let days: Vec<u32> = store
            .slots_between(date(2025, 7, 1), date(2025, 7, 31))
            .map(|s| chrono::Datelike::day(&s.date))
            .collect();
        assert_eq!(days, vec![1, 5, 15, 20, 31]);

        assert_eq!(
            store
                .slots_between(date(2025, 8, 1), date(2025, 7, 1))
                .count(),
            0
        );
    }
}
