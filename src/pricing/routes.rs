//! Pricing API routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::calculators::{compute_price_with_bookings, compute_total};
use super::models::PricingConfig;
use super::requests::{CalculatePriceRequest, CalculateTotalRequest, QuoteBookingRequest};
use super::responses::{MoneyResponse, PriceResponse, QuoteResponse, TotalResponse};
use super::services::quote_booking;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tours/:id/pricing", get(get_pricing).put(update_pricing))
        .route("/api/tours/:id/price", post(calculate_price))
        .route("/api/tours/:id/quote", post(quote))
        .route("/api/pricing/total", post(calculate_total))
}

async fn get_pricing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PricingConfig>> {
    let catalog = state.catalog.read().await;
    let tour = catalog.get(id)?;
    Ok(Json(tour.pricing.clone()))
}

async fn update_pricing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(pricing): Json<PricingConfig>,
) -> Result<Json<PricingConfig>> {
    let mut catalog = state.catalog.write().await;
    let tour = catalog.set_pricing(id, pricing)?;
    info!(
        "Updated pricing for tour {}: base {}, {} seasonal, {} discounts, {} group tiers",
        id,
        tour.pricing.base_price,
        tour.pricing.seasonal_rates.len(),
        tour.pricing.discounts.len(),
        tour.pricing.group_discounts.len()
    );
    Ok(Json(tour.pricing.clone()))
}

async fn calculate_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CalculatePriceRequest>,
) -> Result<Json<PriceResponse>> {
    let catalog = state.catalog.read().await;
    let tour = catalog.get(id)?;
    let quote = compute_price_with_bookings(
        &tour.pricing,
        req.date,
        req.party_size,
        tour.bookings,
    )?;

    Ok(Json(PriceResponse {
        tour_id: id,
        date: req.date,
        party_size: req.party_size,
        unit_price: MoneyResponse::new(quote.unit_price, &state.config.currency),
        breakdown: quote.breakdown,
    }))
}

async fn quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<QuoteBookingRequest>,
) -> Result<Json<QuoteResponse>> {
    let catalog = state.catalog.read().await;
    let (tour, availability) = catalog.tour_with_availability(id)?;
    let tax_rate = req.tax_rate.unwrap_or(state.config.tax_rate);
    let quote = quote_booking(
        &tour.pricing,
        availability,
        req.date,
        req.travelers,
        tour.bookings,
        tax_rate,
    )?;

    Ok(Json(QuoteResponse::new(quote, &state.config.currency)))
}

async fn calculate_total(
    State(state): State<AppState>,
    Json(req): Json<CalculateTotalRequest>,
) -> Result<Json<TotalResponse>> {
    let tax_rate = req.tax_rate.unwrap_or(state.config.tax_rate);
    let totals = compute_total(req.unit_price, req.travelers, tax_rate)?;

    Ok(Json(TotalResponse::new(
        totals,
        req.travelers,
        tax_rate,
        &state.config.currency,
    )))
}
