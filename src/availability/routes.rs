//! Availability calendar routes.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::models::{AvailabilitySlot, SlotUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tours/:id/availability", get(list_slots))
        .route(
            "/api/tours/:id/availability/:date",
            get(get_slot).put(upsert_slot),
        )
        .route("/api/tours/:id/blocked-dates", post(block_dates))
}

/// Calendar window; open ends mean unbounded
#[derive(Debug, Deserialize)]
struct RangeQuery {
    #[serde(default)]
    from: Option<NaiveDate>,
    #[serde(default)]
    to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct BlockDatesRequest {
    dates: Vec<NaiveDate>,
    #[serde(default)]
    reason: Option<String>,
}

async fn list_slots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(range): Query<RangeQuery>,
) -> Result<Json<Vec<AvailabilitySlot>>> {
    let catalog = state.catalog.read().await;
    let store = catalog.availability(id)?;
    let from = range.from.unwrap_or(NaiveDate::MIN);
    let to = range.to.unwrap_or(NaiveDate::MAX);
    let slots: Vec<AvailabilitySlot> = store.slots_between(from, to).cloned().collect();
    debug!("Listing {} slots for tour {}", slots.len(), id);
    Ok(Json(slots))
}

async fn get_slot(
    State(state): State<AppState>,
    Path((id, date)): Path<(Uuid, NaiveDate)>,
) -> Result<Json<AvailabilitySlot>> {
    let catalog = state.catalog.read().await;
    let slot = catalog.availability(id)?.require_slot(date)?;
    Ok(Json(slot.clone()))
}

async fn upsert_slot(
    State(state): State<AppState>,
    Path((id, date)): Path<(Uuid, NaiveDate)>,
    Json(update): Json<SlotUpdate>,
) -> Result<Json<AvailabilitySlot>> {
    let mut catalog = state.catalog.write().await;
    let slot = catalog.availability_mut(id)?.upsert_slot(date, update)?;
    info!(
        "Updated availability for tour {} on {}: {}/{} booked, {}",
        id, date, slot.booked_spots, slot.available_spots, slot.status
    );
    Ok(Json(slot))
}

async fn block_dates(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<BlockDatesRequest>,
) -> Result<Json<Vec<AvailabilitySlot>>> {
    let mut catalog = state.catalog.write().await;
    let slots = catalog.block_dates(id, &req.dates, req.reason)?;
    info!("Blocked {} dates for tour {}", slots.len(), id);
    Ok(Json(slots))
}
