use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub is_owner: bool,
    pub is_confirmed: bool,
}

impl Participant {
    /// The trip creator; confirmed from the start.
    pub fn owner(trip_id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            name: Some(name.into()),
            email: email.into(),
            is_owner: true,
            is_confirmed: true,
        }
    }

    pub fn invitee(trip_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            name: None,
            email: email.into(),
            is_owner: false,
            is_confirmed: false,
        }
    }
}
