//! In-memory tour catalog.
//!
//! Owns every tour together with its availability calendar. Callers share it
//! behind a lock; nothing here is global.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::availability::{AvailabilitySlot, AvailabilityStore};
use crate::error::{BookingError, BookingResult};
use crate::pricing::PricingConfig;

use super::models::{
    CatalogAnalytics, ItineraryDay, ItineraryDayUpdate, NewItineraryDay, NewTour, Tour,
    TourBookings, TourFilter, TourImage, TourSummary, TourUpdate,
};
use super::seed;

/// Rows in the analytics top-tours table
const TOP_TOURS: usize = 3;

struct CatalogEntry {
    tour: Tour,
    availability: AvailabilityStore,
}

/// All tours known to the site, keyed by id
#[derive(Default)]
pub struct TourCatalog {
    entries: HashMap<Uuid, CatalogEntry>,
}

impl TourCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-filled with the sample tours
    pub fn with_sample_tours() -> Self {
        let mut catalog = Self::new();
        for tour in seed::sample_tours() {
            if let Err(e) = tour.and_then(|tour| catalog.insert(tour)) {
                warn!("Skipping sample tour: {}", e);
            }
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a tour with an empty calendar sized to its max group.
    ///
    /// The tour details and pricing config are validated first; an invalid
    /// tour is not stored.
    pub fn insert(&mut self, tour: Tour) -> BookingResult<Uuid> {
        validate_details(&tour)?;
        tour.pricing.validate()?;
        let id = tour.id;
        let availability = AvailabilityStore::new(id, tour.max_group_size);
        self.entries.insert(id, CatalogEntry { tour, availability });
        Ok(id)
    }

    /// Tours matching `filter`, featured first, then by title
    pub fn list(&self, filter: &TourFilter) -> Vec<TourSummary> {
        let mut tours: Vec<&Tour> = self
            .entries
            .values()
            .map(|entry| &entry.tour)
            .filter(|tour| filter.matches(tour))
            .collect();
        tours.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then_with(|| a.title.cmp(&b.title))
        });
        tours.into_iter().map(TourSummary::from).collect()
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .entries
            .values()
            .map(|entry| entry.tour.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    pub fn get(&self, id: Uuid) -> BookingResult<&Tour> {
        self.entry(id).map(|entry| &entry.tour)
    }

    pub fn availability(&self, id: Uuid) -> BookingResult<&AvailabilityStore> {
        self.entry(id).map(|entry| &entry.availability)
    }

    pub fn availability_mut(&mut self, id: Uuid) -> BookingResult<&mut AvailabilityStore> {
        self.entry_mut(id).map(|entry| &mut entry.availability)
    }

    /// Tour and calendar together, for quoting
    pub fn tour_with_availability(
        &self,
        id: Uuid,
    ) -> BookingResult<(&Tour, &AvailabilityStore)> {
        self.entry(id)
            .map(|entry| (&entry.tour, &entry.availability))
    }

    /// Replace a tour's pricing after validating the new config
    pub fn set_pricing(&mut self, id: Uuid, pricing: PricingConfig) -> BookingResult<&Tour> {
        pricing.validate()?;
        let entry = self.entry_mut(id)?;
        entry.tour.pricing = pricing;
        Ok(&entry.tour)
    }

    // ==================== tours ====================

    /// Create a tour from the admin form; media and itinerary start empty
    pub fn create_tour(&mut self, new_tour: NewTour) -> BookingResult<Tour> {
        let tour = Tour {
            id: Uuid::new_v4(),
            title: new_tour.title.trim().to_string(),
            description: new_tour.description,
            category: new_tour.category.trim().to_string(),
            location: new_tour.location.trim().to_string(),
            duration_days: new_tour.duration_days,
            rating: Decimal::ZERO,
            max_group_size: new_tour.max_group_size,
            featured: new_tour.featured,
            bookings: new_tour.bookings,
            images: Vec::new(),
            itinerary: Vec::new(),
            inclusions: clean_entries(new_tour.inclusions),
            exclusions: clean_entries(new_tour.exclusions),
            pricing: new_tour.pricing,
        };
        self.insert(tour.clone())?;
        Ok(tour)
    }

    /// Apply a partial edit. The stored tour is untouched unless the edited
    /// version validates.
    pub fn update_tour(&mut self, id: Uuid, update: TourUpdate) -> BookingResult<Tour> {
        let entry = self.entry_mut(id)?;
        let mut tour = entry.tour.clone();

        if let Some(title) = update.title {
            tour.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            tour.description = description;
        }
        if let Some(category) = update.category {
            tour.category = category.trim().to_string();
        }
        if let Some(location) = update.location {
            tour.location = location.trim().to_string();
        }
        if let Some(duration_days) = update.duration_days {
            tour.duration_days = duration_days;
        }
        if let Some(max_group_size) = update.max_group_size {
            tour.max_group_size = max_group_size;
        }
        if let Some(featured) = update.featured {
            tour.featured = featured;
        }
        if let Some(bookings) = update.bookings {
            tour.bookings = bookings;
        }
        if let Some(inclusions) = update.inclusions {
            tour.inclusions = clean_entries(inclusions);
        }
        if let Some(exclusions) = update.exclusions {
            tour.exclusions = clean_entries(exclusions);
        }
        if let Some(pricing) = update.pricing {
            tour.pricing = pricing;
        }

        validate_details(&tour)?;
        tour.pricing.validate()?;

        entry.availability.set_default_capacity(tour.max_group_size);
        entry.tour = tour.clone();
        Ok(tour)
    }

    /// Remove a tour together with its calendar
    pub fn delete_tour(&mut self, id: Uuid) -> BookingResult<Tour> {
        self.entries
            .remove(&id)
            .map(|entry| entry.tour)
            .ok_or_else(|| BookingError::not_found(format!("Tour {}", id)))
    }

    /// Booking totals, revenue at base price and the most booked tours
    pub fn analytics(&self) -> CatalogAnalytics {
        let tours: Vec<&Tour> = self.entries.values().map(|entry| &entry.tour).collect();

        let total_bookings: u64 = tours.iter().map(|t| u64::from(t.bookings)).sum();
        let revenue = tours.iter().fold(Decimal::ZERO, |sum, t| {
            sum.saturating_add(t.base_price().saturating_mul(Decimal::from(t.bookings)))
        });

        let mut ranked = tours.clone();
        ranked.sort_by(|a, b| {
            b.bookings
                .cmp(&a.bookings)
                .then_with(|| a.title.cmp(&b.title))
        });
        let top_tours = ranked
            .into_iter()
            .take(TOP_TOURS)
            .map(|t| TourBookings {
                id: t.id,
                title: t.title.clone(),
                bookings: t.bookings,
            })
            .collect();

        CatalogAnalytics {
            total_tours: tours.len(),
            total_bookings,
            revenue,
            top_tours,
        }
    }

    // ==================== itinerary ====================

    /// Append a day; it is numbered after the current last day
    pub fn add_itinerary_day(
        &mut self,
        id: Uuid,
        new_day: NewItineraryDay,
    ) -> BookingResult<ItineraryDay> {
        let tour = self.tour_mut(id)?;
        let number = tour.itinerary.len() as u32 + 1;
        let title = new_day
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Day {}", number));

        let day = ItineraryDay {
            id: Uuid::new_v4(),
            day: number,
            title,
            description: new_day.description,
            activities: clean_entries(new_day.activities),
            meals: clean_entries(new_day.meals),
            accommodation: new_day.accommodation.filter(|a| !a.trim().is_empty()),
        };
        tour.itinerary.push(day.clone());
        Ok(day)
    }

    pub fn update_itinerary_day(
        &mut self,
        id: Uuid,
        day_id: Uuid,
        update: ItineraryDayUpdate,
    ) -> BookingResult<ItineraryDay> {
        let tour = self.tour_mut(id)?;
        let day = tour
            .itinerary
            .iter_mut()
            .find(|d| d.id == day_id)
            .ok_or_else(|| BookingError::not_found(format!("Itinerary day {}", day_id)))?;

        if let Some(title) = update.title {
            day.title = title;
        }
        if let Some(description) = update.description {
            day.description = description;
        }
        if let Some(activities) = update.activities {
            day.activities = clean_entries(activities);
        }
        if let Some(meals) = update.meals {
            day.meals = clean_entries(meals);
        }
        if let Some(accommodation) = update.accommodation {
            day.accommodation = Some(accommodation).filter(|a| !a.trim().is_empty());
        }
        Ok(day.clone())
    }

    /// Remove a day and renumber the rest from 1
    pub fn remove_itinerary_day(&mut self, id: Uuid, day_id: Uuid) -> BookingResult<()> {
        let tour = self.tour_mut(id)?;
        let before = tour.itinerary.len();
        tour.itinerary.retain(|d| d.id != day_id);
        if tour.itinerary.len() == before {
            return Err(BookingError::not_found(format!("Itinerary day {}", day_id)));
        }
        for (index, day) in tour.itinerary.iter_mut().enumerate() {
            day.day = index as u32 + 1;
        }
        Ok(())
    }

    // ==================== media ====================

    /// Record an uploaded image; the first image of a tour becomes primary
    pub fn add_image(
        &mut self,
        id: Uuid,
        url: String,
        alt: String,
    ) -> BookingResult<TourImage> {
        if url.trim().is_empty() {
            return Err(BookingError::validation("Image url is required"));
        }
        let tour = self.tour_mut(id)?;
        let image = TourImage {
            id: Uuid::new_v4(),
            url,
            alt,
            is_primary: tour.images.is_empty(),
        };
        tour.images.push(image.clone());
        Ok(image)
    }

    /// Remove an image; if it was primary the next remaining image takes over
    pub fn remove_image(&mut self, id: Uuid, image_id: Uuid) -> BookingResult<()> {
        let tour = self.tour_mut(id)?;
        let position = tour
            .images
            .iter()
            .position(|img| img.id == image_id)
            .ok_or_else(|| BookingError::not_found(format!("Image {}", image_id)))?;

        let removed = tour.images.remove(position);
        if removed.is_primary {
            if let Some(first) = tour.images.first_mut() {
                first.is_primary = true;
            }
        }
        Ok(())
    }

    /// Make one image primary and every other image not
    pub fn set_primary_image(&mut self, id: Uuid, image_id: Uuid) -> BookingResult<TourImage> {
        let tour = self.tour_mut(id)?;
        if !tour.images.iter().any(|img| img.id == image_id) {
            return Err(BookingError::not_found(format!("Image {}", image_id)));
        }
        for image in tour.images.iter_mut() {
            image.is_primary = image.id == image_id;
        }
        tour.primary_image()
            .cloned()
            .ok_or_else(|| BookingError::not_found(format!("Image {}", image_id)))
    }

    pub fn update_image_alt(
        &mut self,
        id: Uuid,
        image_id: Uuid,
        alt: String,
    ) -> BookingResult<TourImage> {
        let tour = self.tour_mut(id)?;
        let image = tour
            .images
            .iter_mut()
            .find(|img| img.id == image_id)
            .ok_or_else(|| BookingError::not_found(format!("Image {}", image_id)))?;
        image.alt = alt;
        Ok(image.clone())
    }

    /// Block the same dates on a tour's calendar
    pub fn block_dates(
        &mut self,
        id: Uuid,
        dates: &[NaiveDate],
        reason: Option<String>,
    ) -> BookingResult<Vec<AvailabilitySlot>> {
        Ok(self.availability_mut(id)?.block_dates(dates, reason))
    }

    fn entry(&self, id: Uuid) -> BookingResult<&CatalogEntry> {
        self.entries
            .get(&id)
            .ok_or_else(|| BookingError::not_found(format!("Tour {}", id)))
    }

    fn entry_mut(&mut self, id: Uuid) -> BookingResult<&mut CatalogEntry> {
        self.entries
            .get_mut(&id)
            .ok_or_else(|| BookingError::not_found(format!("Tour {}", id)))
    }

    fn tour_mut(&mut self, id: Uuid) -> BookingResult<&mut Tour> {
        self.entry_mut(id).map(|entry| &mut entry.tour)
    }
}

/// Required tour fields for the admin form
fn validate_details(tour: &Tour) -> BookingResult<()> {
    if tour.title.trim().is_empty() {
        return Err(BookingError::validation("Tour title is required"));
    }
    if tour.category.trim().is_empty() {
        return Err(BookingError::validation("Tour category is required"));
    }
    if tour.location.trim().is_empty() {
        return Err(BookingError::validation("Tour location is required"));
    }
    if tour.duration_days == 0 {
        return Err(BookingError::validation("Tour must last at least one day"));
    }
    if tour.max_group_size == 0 {
        return Err(BookingError::validation("Max group size must be at least 1"));
    }
    Ok(())
}

/// Trim entries and drop the blank ones
fn clean_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}
