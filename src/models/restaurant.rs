use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::schedule::WeeklyInterval;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub category: String,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
    pub rating: Option<f64>,
    pub delivery_enabled: bool,
    pub opening_hours: Vec<WeeklyInterval>,
    pub delivery_hours: Vec<WeeklyInterval>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
