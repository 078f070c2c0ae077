use uuid::Uuid;

use crate::geo::haversine_km;
use crate::models::restaurant::{GeoPoint, Restaurant};

/// Minimal shape the ranking functions need from an entity.
pub trait Rankable {
    fn id(&self) -> Uuid;
    fn location(&self) -> Option<GeoPoint>;
    fn quality_score(&self) -> Option<f64>;
}

impl Rankable for Restaurant {
    fn id(&self) -> Uuid {
        self.id
    }

    fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    fn quality_score(&self) -> Option<f64> {
        self.rating
    }
}

/// Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceResult {
    pub entity_id: Uuid,
    pub distance_km: f64,
}

/// Order entities by ascending great-circle distance from `origin`.
/// Entities without coordinates rank last (distance = +inf). The sort is
/// stable: ties keep their input order. Input is left untouched.
pub fn rank_by_proximity<T: Rankable>(entities: &[T], origin: &GeoPoint) -> Vec<DistanceResult> {
    let mut ranked: Vec<DistanceResult> = entities
        .iter()
        .map(|entity| DistanceResult {
            entity_id: entity.id(),
            distance_km: entity
                .location()
                .map(|location| haversine_km(&location, origin))
                .unwrap_or(f64::INFINITY),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}

/// Order entities by descending quality score, missing scores counting as 0.
/// Stable: ties keep their input order. Input is left untouched.
pub fn rank_by_quality<T: Rankable>(entities: &[T]) -> Vec<Uuid> {
    let mut scored: Vec<(Uuid, f64)> = entities
        .iter()
        .map(|entity| (entity.id(), entity.quality_score().unwrap_or(0.0)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(id, _)| id).collect()
}
