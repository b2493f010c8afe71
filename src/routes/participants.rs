use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{
    error::AppError,
    routes::{parse_id, trips::ParticipantView},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/participants/:participant_id", get(get_participant))
        .route(
            "/trips/participants/:participant_id/confirm",
            get(confirm_participant),
        )
}

#[derive(Debug, Serialize)]
pub struct ParticipantDetails {
    pub participant: ParticipantView,
}

async fn get_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<String>,
) -> Result<Json<ParticipantDetails>, AppError> {
    let participant_id = parse_id("participantId", &participant_id)?;
    let participant = state.trips.get_participant(participant_id).await?;
    Ok(Json(ParticipantDetails {
        participant: participant.into(),
    }))
}

async fn confirm_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<String>,
) -> Result<Redirect, AppError> {
    let participant_id = parse_id("participantId", &participant_id)?;
    let target = state.trips.confirm_participant(participant_id).await?;
    Ok(Redirect::to(&target))
}
