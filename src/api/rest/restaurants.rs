use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::hours::{format_group_label, group_intervals, is_open_at};
use crate::engine::ranking::{rank_by_proximity, rank_by_quality};
use crate::error::AppError;
use crate::geo::haversine_km;
use crate::models::event::{DirectoryEvent, DirectoryEventKind};
use crate::models::restaurant::{GeoPoint, Restaurant};
use crate::models::schedule::{LocalMoment, WeeklyInterval};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/restaurants",
            post(register_restaurant).get(list_restaurants),
        )
        .route("/restaurants/:id", get(get_restaurant))
        .route("/restaurants/:id/hours", patch(update_hours))
        .route("/restaurants/:id/location", patch(update_location))
}

#[derive(Deserialize)]
pub struct RegisterRestaurantRequest {
    pub name: String,
    pub city: String,
    pub category: String,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub delivery_enabled: bool,
    #[serde(default)]
    pub opening_hours: Vec<WeeklyInterval>,
    #[serde(default)]
    pub delivery_hours: Vec<WeeklyInterval>,
}

#[derive(Deserialize)]
pub struct UpdateHoursRequest {
    pub opening_hours: Option<Vec<WeeklyInterval>>,
    pub delivery_hours: Option<Vec<WeeklyInterval>>,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub location: GeoPoint,
}

#[derive(Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Distance,
    Rating,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub city: Option<String>,
    pub category: Option<String>,
    pub open_now: Option<bool>,
    pub sort: Option<SortMode>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize)]
pub struct RestaurantSummary {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub category: String,
    pub rating: Option<f64>,
    pub open_now: bool,
    pub delivery_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

#[derive(Serialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub open_now: bool,
    pub delivery_open: bool,
    pub opening_hours_display: Vec<String>,
    pub delivery_hours_display: Vec<String>,
}

async fn register_restaurant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRestaurantRequest>,
) -> Result<Json<Restaurant>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if payload.city.trim().is_empty() {
        return Err(AppError::BadRequest("city cannot be empty".to_string()));
    }

    validate_intervals(&payload.opening_hours)?;
    validate_intervals(&payload.delivery_hours)?;

    let restaurant = Restaurant {
        id: Uuid::new_v4(),
        name: payload.name,
        city: payload.city,
        category: payload.category,
        address: payload.address,
        location: payload.location,
        rating: payload.rating.map(|rating| rating.clamp(0.0, 5.0)),
        delivery_enabled: payload.delivery_enabled,
        opening_hours: payload.opening_hours,
        delivery_hours: payload.delivery_hours,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    state.restaurants.insert(restaurant.id, restaurant.clone());
    state
        .metrics
        .restaurants_registered
        .set(state.restaurants.len() as i64);
    publish(&state, DirectoryEventKind::Registered, restaurant.clone());

    info!(restaurant_id = %restaurant.id, city = %restaurant.city, "restaurant registered");

    Ok(Json(restaurant))
}

async fn list_restaurants(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<RestaurantSummary>>, AppError> {
    let start = Instant::now();

    let origin = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "lat and lng must be supplied together".to_string(),
            ));
        }
    };

    let mut snapshot: Vec<Restaurant> = state
        .restaurants
        .iter()
        .filter(|entry| {
            let restaurant = entry.value();
            let city_matches = query
                .city
                .as_deref()
                .is_none_or(|city| restaurant.city.eq_ignore_ascii_case(city));
            let category_matches = query
                .category
                .as_deref()
                .is_none_or(|category| restaurant.category.eq_ignore_ascii_case(category));
            city_matches && category_matches
        })
        .map(|entry| entry.value().clone())
        .collect();

    // The backing map iterates in arbitrary order; name order is the
    // baseline that tie-breaking in the sort modes is measured against.
    snapshot.sort_by(|a, b| a.name.cmp(&b.name));

    let now = LocalMoment::from_datetime(state.local_now());

    if query.open_now.unwrap_or(false) {
        snapshot.retain(|restaurant| is_open_at(&restaurant.opening_hours, now));
    }

    let mut summaries: HashMap<Uuid, RestaurantSummary> = snapshot
        .iter()
        .map(|restaurant| (restaurant.id, summarize(restaurant, now, origin.as_ref())))
        .collect();

    let ordered_ids: Vec<Uuid> = match query.sort {
        Some(SortMode::Distance) => {
            let origin = origin.as_ref().ok_or_else(|| {
                AppError::BadRequest("sort=distance requires lat and lng".to_string())
            })?;
            rank_by_proximity(&snapshot, origin)
                .into_iter()
                .map(|result| result.entity_id)
                .collect()
        }
        Some(SortMode::Rating) => rank_by_quality(&snapshot),
        None => snapshot.iter().map(|restaurant| restaurant.id).collect(),
    };

    let rows: Vec<RestaurantSummary> = ordered_ids
        .into_iter()
        .filter_map(|id| summaries.remove(&id))
        .collect();

    let sort_label = match query.sort {
        Some(SortMode::Distance) => "distance",
        Some(SortMode::Rating) => "rating",
        None => "none",
    };
    state
        .metrics
        .directory_queries_total
        .with_label_values(&[sort_label])
        .inc();
    state
        .metrics
        .query_latency_seconds
        .with_label_values(&["list"])
        .observe(start.elapsed().as_secs_f64());

    Ok(Json(rows))
}

async fn get_restaurant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RestaurantDetail>, AppError> {
    let start = Instant::now();

    let restaurant = state
        .restaurants
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("restaurant {} not found", id)))?
        .value()
        .clone();

    let now = LocalMoment::from_datetime(state.local_now());

    let opening_hours_display = group_intervals(&restaurant.opening_hours)
        .iter()
        .map(format_group_label)
        .collect();
    let delivery_hours_display = group_intervals(&restaurant.delivery_hours)
        .iter()
        .map(format_group_label)
        .collect();

    let detail = RestaurantDetail {
        open_now: is_open_at(&restaurant.opening_hours, now),
        delivery_open: restaurant.delivery_enabled
            && is_open_at(&restaurant.delivery_hours, now),
        opening_hours_display,
        delivery_hours_display,
        restaurant,
    };

    state
        .metrics
        .query_latency_seconds
        .with_label_values(&["detail"])
        .observe(start.elapsed().as_secs_f64());

    Ok(Json(detail))
}

async fn update_hours(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHoursRequest>,
) -> Result<Json<Restaurant>, AppError> {
    if let Some(intervals) = &payload.opening_hours {
        validate_intervals(intervals)?;
    }
    if let Some(intervals) = &payload.delivery_hours {
        validate_intervals(intervals)?;
    }

    let mut restaurant = state
        .restaurants
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("restaurant {} not found", id)))?;

    if let Some(intervals) = payload.opening_hours {
        restaurant.opening_hours = intervals;
    }
    if let Some(intervals) = payload.delivery_hours {
        restaurant.delivery_hours = intervals;
    }
    restaurant.updated_at = Utc::now();

    let updated = restaurant.clone();
    drop(restaurant);

    publish(&state, DirectoryEventKind::HoursUpdated, updated.clone());

    Ok(Json(updated))
}

async fn update_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<Restaurant>, AppError> {
    let mut restaurant = state
        .restaurants
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("restaurant {} not found", id)))?;

    restaurant.location = Some(payload.location);
    restaurant.updated_at = Utc::now();

    let updated = restaurant.clone();
    drop(restaurant);

    publish(&state, DirectoryEventKind::LocationUpdated, updated.clone());

    Ok(Json(updated))
}

fn summarize(restaurant: &Restaurant, now: LocalMoment, origin: Option<&GeoPoint>) -> RestaurantSummary {
    let distance_km = match (origin, restaurant.location.as_ref()) {
        (Some(origin), Some(location)) => Some(haversine_km(location, origin)),
        _ => None,
    };

    RestaurantSummary {
        id: restaurant.id,
        name: restaurant.name.clone(),
        city: restaurant.city.clone(),
        category: restaurant.category.clone(),
        rating: restaurant.rating,
        open_now: is_open_at(&restaurant.opening_hours, now),
        delivery_open: restaurant.delivery_enabled
            && is_open_at(&restaurant.delivery_hours, now),
        distance_km,
    }
}

fn validate_intervals(intervals: &[WeeklyInterval]) -> Result<(), AppError> {
    for interval in intervals {
        interval.validate().map_err(AppError::BadRequest)?;
    }
    Ok(())
}

fn publish(state: &AppState, kind: DirectoryEventKind, restaurant: Restaurant) {
    let event = DirectoryEvent {
        kind,
        restaurant,
        occurred_at: Utc::now(),
    };
    let _ = state.directory_events_tx.send(event);
}
