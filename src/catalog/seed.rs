//! Sample tours served until a real catalog source exists.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::pricing::{Discount, GroupDiscount, PricingConfig, SeasonalRate};

use super::models::{ItineraryDay, Tour, TourImage};

struct SampleTour {
    title: &'static str,
    category: &'static str,
    location: &'static str,
    duration_days: u32,
    rating: Decimal,
    max_group_size: u32,
    featured: bool,
    bookings: u32,
    price: Decimal,
    image: &'static str,
}

const SAMPLES: &[SampleTour] = &[
    SampleTour {
        title: "Majestic Alps Hiking Adventure",
        category: "Adventure",
        location: "Swiss Alps, Switzerland",
        duration_days: 7,
        rating: dec!(4.8),
        max_group_size: 12,
        featured: true,
        bookings: 24,
        price: dec!(1299),
        image: "https://images.unsplash.com/photo-1527004013197-933c4bb611b3?w=800&q=80",
    },
    SampleTour {
        title: "Ancient Rome Cultural Experience",
        category: "Cultural",
        location: "Rome, Italy",
        duration_days: 5,
        rating: dec!(4.6),
        max_group_size: 15,
        featured: false,
        bookings: 18,
        price: dec!(899),
        image: "https://images.unsplash.com/photo-1552832230-c0197dd311b5?w=800&q=80",
    },
    SampleTour {
        title: "Tropical Paradise Beach Retreat",
        category: "Beach",
        location: "Bali, Indonesia",
        duration_days: 10,
        rating: dec!(4.9),
        max_group_size: 10,
        featured: true,
        bookings: 32,
        price: dec!(1599),
        image: "https://images.unsplash.com/photo-1537996194471-e657df975ab4?w=800&q=80",
    },
    SampleTour {
        title: "Urban Explorer: New York City",
        category: "City",
        location: "New York, USA",
        duration_days: 4,
        rating: dec!(4.5),
        max_group_size: 20,
        featured: false,
        bookings: 15,
        price: dec!(1199),
        image: "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?w=800&q=80",
    },
    SampleTour {
        title: "African Safari Wildlife Expedition",
        category: "Wildlife",
        location: "Kenya & Tanzania",
        duration_days: 12,
        rating: dec!(4.9),
        max_group_size: 8,
        featured: true,
        bookings: 12,
        price: dec!(2499),
        image: "https://images.unsplash.com/photo-1516426122078-c23e76319801?w=800&q=80",
    },
    SampleTour {
        title: "Mountain Biking Extreme",
        category: "Adventure",
        location: "Moab, Utah",
        duration_days: 3,
        rating: dec!(4.7),
        max_group_size: 6,
        featured: false,
        bookings: 9,
        price: dec!(899),
        image: "https://images.unsplash.com/photo-1544191696-102dbdaeeaa0?w=800&q=80",
    },
    SampleTour {
        title: "Historic Athens Discovery",
        category: "Cultural",
        location: "Athens, Greece",
        duration_days: 6,
        rating: dec!(4.6),
        max_group_size: 15,
        featured: false,
        bookings: 11,
        price: dec!(799),
        image: "https://images.unsplash.com/photo-1555993539-1732b0258235?w=800&q=80",
    },
    SampleTour {
        title: "Caribbean Island Hopping",
        category: "Beach",
        location: "Caribbean Islands",
        duration_days: 14,
        rating: dec!(4.8),
        max_group_size: 12,
        featured: false,
        bookings: 20,
        price: dec!(2199),
        image: "https://images.unsplash.com/photo-1548574505-5e239809ee19?w=800&q=80",
    },
];

fn date(y: i32, m: u32, d: u32) -> BookingResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| BookingError::validation(format!("Invalid sample date {}-{}-{}", y, m, d)))
}

/// Summer pricing for the flagship Alps tour
fn alps_pricing(base_price: Decimal) -> BookingResult<PricingConfig> {
    Ok(PricingConfig {
        base_price,
        seasonal_rates: vec![SeasonalRate::new(
            "Peak Season",
            date(2025, 6, 1)?,
            date(2025, 8, 31)?,
            dec!(1.2),
        )],
        discounts: vec![Discount::percentage(
            "Summer Sale",
            dec!(10),
            date(2025, 7, 1)?,
            date(2025, 7, 31)?,
        )],
        group_discounts: vec![GroupDiscount::new(6, 12, dec!(10))],
    })
}

fn alps_itinerary() -> Vec<ItineraryDay> {
    let days = [
        ("Arrival in Zurich", "Meet your guide and transfer to the mountain lodge."),
        ("Lauterbrunnen Valley", "Hike past the valley's waterfalls to Mürren."),
        ("Jungfrau Region", "Cable car ascent and ridge walk with panoramic views."),
    ];
    days.iter()
        .enumerate()
        .map(|(index, (title, description))| ItineraryDay {
            id: Uuid::new_v4(),
            day: index as u32 + 1,
            title: title.to_string(),
            description: description.to_string(),
            activities: vec!["Guided hike".to_string()],
            meals: vec!["Breakfast".to_string(), "Dinner".to_string()],
            accommodation: Some("Mountain lodge".to_string()),
        })
        .collect()
}

/// Build the sample catalog tours with fresh ids, one result per sample
pub fn sample_tours() -> Vec<BookingResult<Tour>> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(index, sample)| build_sample(sample, index == 0))
        .collect()
}

fn build_sample(sample: &SampleTour, flagship: bool) -> BookingResult<Tour> {
    let pricing = if flagship {
        alps_pricing(sample.price)?
    } else {
        PricingConfig::new(sample.price)
    };

    Ok(Tour {
        id: Uuid::new_v4(),
        title: sample.title.to_string(),
        description: format!(
            "{} days in {} with expert local guides.",
            sample.duration_days, sample.location
        ),
        category: sample.category.to_string(),
        location: sample.location.to_string(),
        duration_days: sample.duration_days,
        rating: sample.rating,
        max_group_size: sample.max_group_size,
        featured: sample.featured,
        bookings: sample.bookings,
        images: vec![TourImage {
            id: Uuid::new_v4(),
            url: sample.image.to_string(),
            alt: sample.title.to_string(),
            is_primary: true,
        }],
        itinerary: if flagship { alps_itinerary() } else { Vec::new() },
        inclusions: vec![
            "Professional English-speaking guide".to_string(),
            "Transportation between locations".to_string(),
        ],
        exclusions: vec![
            "International flights".to_string(),
            "Travel insurance".to_string(),
        ],
        pricing,
    })
}
