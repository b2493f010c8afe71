use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(
        destination: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            destination: destination.into(),
            starts_at,
            ends_at,
            is_confirmed: false,
            created_at: Utc::now(),
        }
    }

    /// `occurs_at` lies within the trip, both ends inclusive.
    pub fn covers(&self, occurs_at: DateTime<Utc>) -> bool {
        occurs_at >= self.starts_at && occurs_at <= self.ends_at
    }
}
