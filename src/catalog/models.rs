//! Tour catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::PricingConfig;

/// Tour image record (the file itself lives elsewhere)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourImage {
    pub id: Uuid,
    pub url: String,
    pub alt: String,
    pub is_primary: bool,
}

/// One day of a tour's itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub id: Uuid,
    /// 1-based position, kept contiguous
    pub day: u32,
    pub title: String,
    pub description: String,
    pub activities: Vec<String>,
    pub meals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
}

/// Input for appending a day to the itinerary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItineraryDay {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub meals: Vec<String>,
    #[serde(default)]
    pub accommodation: Option<String>,
}

/// Partial edit of an itinerary day
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryDayUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub activities: Option<Vec<String>>,
    #[serde(default)]
    pub meals: Option<Vec<String>>,
    #[serde(default)]
    pub accommodation: Option<String>,
}

/// A tour as listed in the catalog, with its pricing setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub duration_days: u32,
    pub rating: Decimal,
    pub max_group_size: u32,
    pub featured: bool,
    /// Confirmed bookings so far; gates `min_bookings` discounts
    #[serde(default)]
    pub bookings: u32,
    pub images: Vec<TourImage>,
    pub itinerary: Vec<ItineraryDay>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub pricing: PricingConfig,
}

impl Tour {
    /// "Starting from" price shown on cards
    pub fn base_price(&self) -> Decimal {
        self.pricing.base_price
    }

    pub fn primary_image(&self) -> Option<&TourImage> {
        self.images.iter().find(|img| img.is_primary)
    }
}

/// Card-sized view of a tour for listings
#[derive(Debug, Clone, Serialize)]
pub struct TourSummary {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub location: String,
    pub duration_days: u32,
    pub rating: Decimal,
    pub max_group_size: u32,
    pub featured: bool,
    pub bookings: u32,
    pub price: Decimal,
    pub image_url: Option<String>,
}

impl From<&Tour> for TourSummary {
    fn from(tour: &Tour) -> Self {
        Self {
            id: tour.id,
            title: tour.title.clone(),
            category: tour.category.clone(),
            location: tour.location.clone(),
            duration_days: tour.duration_days,
            rating: tour.rating,
            max_group_size: tour.max_group_size,
            featured: tour.featured,
            bookings: tour.bookings,
            price: tour.base_price(),
            image_url: tour.primary_image().map(|img| img.url.clone()),
        }
    }
}

/// Search and category filters from the catalog page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TourFilter {
    /// Category name; "all" or absent means every category
    #[serde(default)]
    pub category: Option<String>,
    /// Matched against title, location and description
    #[serde(default, rename = "q")]
    pub keyword: Option<String>,
    #[serde(default)]
    pub max_duration_days: Option<u32>,
    #[serde(default)]
    pub max_price: Option<Decimal>,
}

impl TourFilter {
    pub fn matches(&self, tour: &Tour) -> bool {
        if let Some(category) = self.category.as_deref().map(str::trim) {
            if !category.is_empty()
                && !category.eq_ignore_ascii_case("all")
                && !category.eq_ignore_ascii_case(&tour.category)
            {
                return false;
            }
        }

        if let Some(keyword) = self.keyword.as_deref().map(str::trim) {
            if !keyword.is_empty() {
                let needle = keyword.to_lowercase();
                let found = [&tour.title, &tour.location, &tour.description]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle));
                if !found {
                    return false;
                }
            }
        }

        if let Some(max_days) = self.max_duration_days {
            if tour.duration_days > max_days {
                return false;
            }
        }

        if let Some(max_price) = self.max_price {
            if tour.base_price() > max_price {
                return false;
            }
        }

        true
    }
}

/// Input for the "Add New Tour" form; the tour starts without media or itinerary
#[derive(Debug, Clone, Deserialize)]
pub struct NewTour {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub location: String,
    pub duration_days: u32,
    pub max_group_size: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bookings: u32,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    pub pricing: PricingConfig,
}

/// Partial edit from the "Edit Tour" form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TourUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub max_group_size: Option<u32>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub bookings: Option<u32>,
    #[serde(default)]
    pub inclusions: Option<Vec<String>>,
    #[serde(default)]
    pub exclusions: Option<Vec<String>>,
    /// Replaces the whole pricing config
    #[serde(default)]
    pub pricing: Option<PricingConfig>,
}

/// One row of the top-tours table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourBookings {
    pub id: Uuid,
    pub title: String,
    pub bookings: u32,
}

/// Dashboard analytics over the whole catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogAnalytics {
    pub total_tours: usize,
    pub total_bookings: u64,
    /// Base price times bookings, summed over tours
    pub revenue: Decimal,
    /// Most booked tours first
    pub top_tours: Vec<TourBookings>,
}
