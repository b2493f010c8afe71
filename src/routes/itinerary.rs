use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::link::Link,
    routes::{parse_id, Payload},
    services::itinerary::AgendaDay,
    state::AppState,
    validation,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/:trip_id/activities",
            get(get_activities).post(create_activity),
        )
        .route("/:trip_id/links", get(get_links).post(create_link))
}

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub title: String,
    pub occurs_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCreated {
    pub activity_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCreated {
    pub link_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct Agenda {
    pub activities: Vec<AgendaDay>,
}

#[derive(Debug, Serialize)]
pub struct LinkView {
    pub id: Uuid,
    pub title: String,
    pub url: String,
}

impl From<Link> for LinkView {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkList {
    pub links: Vec<LinkView>,
}

async fn create_activity(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Payload(body): Payload<CreateActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let trip_id = parse_id("tripId", &trip_id)?;
    validation::min_len("title", &body.title, 4)?;
    let activity_id = state
        .itinerary
        .create_activity(trip_id, body.title.trim().to_string(), body.occurs_at)
        .await?;
    Ok((StatusCode::CREATED, Json(ActivityCreated { activity_id })))
}

async fn get_activities(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Agenda>, AppError> {
    let trip_id = parse_id("tripId", &trip_id)?;
    let activities = state.itinerary.agenda(trip_id).await?;
    Ok(Json(Agenda { activities }))
}

async fn create_link(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Payload(body): Payload<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let trip_id = parse_id("tripId", &trip_id)?;
    validation::min_len("title", &body.title, 4)?;
    validation::http_url("url", &body.url)?;
    let link_id = state
        .itinerary
        .create_link(trip_id, body.title.trim().to_string(), body.url)
        .await?;
    Ok((StatusCode::CREATED, Json(LinkCreated { link_id })))
}

async fn get_links(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<LinkList>, AppError> {
    let trip_id = parse_id("tripId", &trip_id)?;
    let links = state.itinerary.links(trip_id).await?;
    Ok(Json(LinkList {
        links: links.into_iter().map(Into::into).collect(),
    }))
}
