use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{participant::Participant, trip::Trip},
    routes::{parse_id, Payload},
    services::trips::{NewTrip, TripChanges},
    state::AppState,
    validation,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trip))
        .route("/:trip_id", get(get_trip).put(update_trip))
        .route("/:trip_id/confirm", get(confirm_trip))
        .route("/:trip_id/invites", post(create_invite))
        .route("/:trip_id/participants", get(get_participants))
}

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub owner_name: String,
    pub owner_email: String,
    #[serde(default)]
    pub emails_to_invite: Vec<String>,
}

impl CreateTripRequest {
    fn validate(self) -> Result<NewTrip, AppError> {
        validation::min_len("destination", &self.destination, 4)?;
        validation::email("owner_email", &self.owner_email)?;
        for email in &self.emails_to_invite {
            validation::email("emails_to_invite", email)?;
        }
        Ok(NewTrip {
            destination: self.destination.trim().to_string(),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            owner_name: self.owner_name.trim().to_string(),
            owner_email: self.owner_email,
            emails_to_invite: self.emails_to_invite,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTripRequest {
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCreated {
    pub trip_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCreated {
    pub participant_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TripView {
    pub id: Uuid,
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_confirmed: bool,
}

impl From<Trip> for TripView {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id,
            destination: trip.destination,
            starts_at: trip.starts_at,
            ends_at: trip.ends_at,
            is_confirmed: trip.is_confirmed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParticipantView {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub is_confirmed: bool,
}

impl From<Participant> for ParticipantView {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name,
            email: participant.email,
            is_confirmed: participant.is_confirmed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripDetails {
    pub trip: TripView,
}

#[derive(Debug, Serialize)]
pub struct ParticipantList {
    pub participants: Vec<ParticipantView>,
}

async fn create_trip(
    State(state): State<AppState>,
    Payload(body): Payload<CreateTripRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_trip = body.validate()?;
    let trip_id = state.trips.create_trip(new_trip).await?;
    Ok((StatusCode::CREATED, Json(TripCreated { trip_id })))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<TripDetails>, AppError> {
    let trip_id = parse_id("tripId", &trip_id)?;
    let trip = state.trips.get_trip(trip_id).await?;
    Ok(Json(TripDetails { trip: trip.into() }))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Payload(body): Payload<UpdateTripRequest>,
) -> Result<Json<TripCreated>, AppError> {
    let trip_id = parse_id("tripId", &trip_id)?;
    validation::min_len("destination", &body.destination, 4)?;
    let changes = TripChanges {
        destination: body.destination.trim().to_string(),
        starts_at: body.starts_at,
        ends_at: body.ends_at,
    };
    let trip_id = state.trips.update_trip(trip_id, changes).await?;
    Ok(Json(TripCreated { trip_id }))
}

async fn confirm_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Redirect, AppError> {
    let trip_id = parse_id("tripId", &trip_id)?;
    let target = state.trips.confirm_trip(trip_id).await?;
    Ok(Redirect::to(&target))
}

async fn create_invite(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Payload(body): Payload<CreateInviteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let trip_id = parse_id("tripId", &trip_id)?;
    validation::email("email", &body.email)?;
    let participant_id = state.trips.create_invite(trip_id, body.email).await?;
    Ok((StatusCode::CREATED, Json(InviteCreated { participant_id })))
}

async fn get_participants(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<ParticipantList>, AppError> {
    let trip_id = parse_id("tripId", &trip_id)?;
    let participants = state.trips.get_participants(trip_id).await?;
    Ok(Json(ParticipantList {
        participants: participants.into_iter().map(Into::into).collect(),
    }))
}
