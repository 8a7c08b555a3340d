//! Catalog and tour admin routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::models::{
    CatalogAnalytics, ItineraryDay, ItineraryDayUpdate, NewItineraryDay, NewTour, Tour,
    TourFilter, TourImage, TourSummary, TourUpdate,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tours", get(list_tours).post(create_tour))
        .route(
            "/api/tours/:id",
            get(get_tour).patch(update_tour).delete(delete_tour),
        )
        .route("/api/analytics", get(analytics))
        .route("/api/tours/:id/itinerary", post(add_itinerary_day))
        .route(
            "/api/tours/:id/itinerary/:day_id",
            patch(update_itinerary_day).delete(remove_itinerary_day),
        )
        .route("/api/tours/:id/images", post(add_image))
        .route(
            "/api/tours/:id/images/:image_id",
            patch(update_image).delete(remove_image),
        )
        .route("/api/tours/:id/images/:image_id/primary", put(set_primary_image))
}

/// Tour listing with the categories available for the filter tabs
#[derive(Debug, Serialize)]
struct TourListResponse {
    tours: Vec<TourSummary>,
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NewImageRequest {
    url: String,
    #[serde(default)]
    alt: String,
}

#[derive(Debug, Deserialize)]
struct UpdateImageRequest {
    alt: String,
}

async fn list_tours(
    State(state): State<AppState>,
    Query(filter): Query<TourFilter>,
) -> Json<TourListResponse> {
    let catalog = state.catalog.read().await;
    Json(TourListResponse {
        tours: catalog.list(&filter),
        categories: catalog.categories(),
    })
}

async fn get_tour(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Tour>> {
    let catalog = state.catalog.read().await;
    Ok(Json(catalog.get(id)?.clone()))
}

async fn create_tour(
    State(state): State<AppState>,
    Json(new_tour): Json<NewTour>,
) -> Result<(StatusCode, Json<Tour>)> {
    let mut catalog = state.catalog.write().await;
    let tour = catalog.create_tour(new_tour)?;
    info!("Created tour {} ({})", tour.id, tour.title);
    Ok((StatusCode::CREATED, Json(tour)))
}

async fn update_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<TourUpdate>,
) -> Result<Json<Tour>> {
    let mut catalog = state.catalog.write().await;
    let tour = catalog.update_tour(id, update)?;
    info!("Updated tour {}", id);
    Ok(Json(tour))
}

async fn delete_tour(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    let mut catalog = state.catalog.write().await;
    let tour = catalog.delete_tour(id)?;
    info!("Deleted tour {} ({})", id, tour.title);
    Ok(StatusCode::NO_CONTENT)
}

async fn analytics(State(state): State<AppState>) -> Json<CatalogAnalytics> {
    let catalog = state.catalog.read().await;
    Json(catalog.analytics())
}

async fn add_itinerary_day(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(new_day): Json<NewItineraryDay>,
) -> Result<(StatusCode, Json<ItineraryDay>)> {
    let mut catalog = state.catalog.write().await;
    let day = catalog.add_itinerary_day(id, new_day)?;
    info!("Added itinerary day {} to tour {}", day.day, id);
    Ok((StatusCode::CREATED, Json(day)))
}

async fn update_itinerary_day(
    State(state): State<AppState>,
    Path((id, day_id)): Path<(Uuid, Uuid)>,
    Json(update): Json<ItineraryDayUpdate>,
) -> Result<Json<ItineraryDay>> {
    let mut catalog = state.catalog.write().await;
    Ok(Json(catalog.update_itinerary_day(id, day_id, update)?))
}

async fn remove_itinerary_day(
    State(state): State<AppState>,
    Path((id, day_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    let mut catalog = state.catalog.write().await;
    catalog.remove_itinerary_day(id, day_id)?;
    info!("Removed itinerary day {} from tour {}", day_id, id);
    Ok(StatusCode::NO_CONTENT)
}

async fn add_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewImageRequest>,
) -> Result<(StatusCode, Json<TourImage>)> {
    let mut catalog = state.catalog.write().await;
    let image = catalog.add_image(id, req.url, req.alt)?;
    info!("Added image {} to tour {}", image.id, id);
    Ok((StatusCode::CREATED, Json(image)))
}

async fn update_image(
    State(state): State<AppState>,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateImageRequest>,
) -> Result<Json<TourImage>> {
    let mut catalog = state.catalog.write().await;
    Ok(Json(catalog.update_image_alt(id, image_id, req.alt)?))
}

async fn remove_image(
    State(state): State<AppState>,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    let mut catalog = state.catalog.write().await;
    catalog.remove_image(id, image_id)?;
    info!("Removed image {} from tour {}", image_id, id);
    Ok(StatusCode::NO_CONTENT)
}

async fn set_primary_image(
    State(state): State<AppState>,
    Path((id, image_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TourImage>> {
    let mut catalog = state.catalog.write().await;
    Ok(Json(catalog.set_primary_image(id, image_id)?))
}
