use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::restaurant::Restaurant;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DirectoryEventKind {
    Registered,
    HoursUpdated,
    LocationUpdated,
}

/// Broadcast to websocket subscribers whenever the directory changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEvent {
    pub kind: DirectoryEventKind,
    pub restaurant: Restaurant,
    pub occurred_at: DateTime<Utc>,
}
