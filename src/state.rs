use chrono::{Duration, NaiveDateTime, Utc};
use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::event::DirectoryEvent;
use crate::models::restaurant::Restaurant;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub restaurants: DashMap<Uuid, Restaurant>,
    pub directory_events_tx: broadcast::Sender<DirectoryEvent>,
    pub metrics: Metrics,
    tz_offset_minutes: i64,
}

impl AppState {
    pub fn new(event_buffer_size: usize, tz_offset_minutes: i64) -> Self {
        let (directory_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            restaurants: DashMap::new(),
            directory_events_tx,
            metrics: Metrics::new(),
            tz_offset_minutes,
        }
    }

    /// Wall clock in the directory's local time, the single place UTC is
    /// shifted before it reaches the schedule engine.
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().naive_utc() + Duration::minutes(self.tz_offset_minutes)
    }
}
