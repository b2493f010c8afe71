use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{participant::Participant, trip::Trip},
    services::{
        mail::{self, SharedMailer},
        notifications::{self, Links},
        storage::TripStore,
    },
};

#[derive(Debug, Clone)]
pub struct NewTrip {
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub owner_name: String,
    pub owner_email: String,
    pub emails_to_invite: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TripChanges {
    pub destination: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Trip lifecycle: creation, invitations and the two confirmation flows.
#[derive(Clone)]
pub struct TripService {
    store: TripStore,
    mailer: SharedMailer,
    links: Links,
}

impl TripService {
    pub fn new(store: TripStore, mailer: SharedMailer, links: Links) -> Self {
        Self {
            store,
            mailer,
            links,
        }
    }

    #[instrument(skip(self, new_trip), fields(destination = %new_trip.destination))]
    pub async fn create_trip(&self, new_trip: NewTrip) -> Result<Uuid, AppError> {
        check_dates(new_trip.starts_at, new_trip.ends_at, Utc::now())?;

        let trip = Trip::new(new_trip.destination, new_trip.starts_at, new_trip.ends_at);
        let owner = Participant::owner(trip.id, new_trip.owner_name, new_trip.owner_email);
        let mut participants = vec![owner.clone()];
        participants.extend(
            new_trip
                .emails_to_invite
                .into_iter()
                .map(|email| Participant::invitee(trip.id, email)),
        );

        self.store.insert_trip(&trip, &participants).await?;
        info!(trip_id = %trip.id, participants = participants.len(), "trip created");

        let message = notifications::trip_created(&self.links, &trip, &owner)?;
        self.mailer.send(message).await?;

        Ok(trip.id)
    }

    pub async fn get_trip(&self, trip_id: Uuid) -> Result<Trip, AppError> {
        self.store
            .find_trip(trip_id)
            .await?
            .ok_or_else(AppError::trip_not_found)
    }

    #[instrument(skip(self, changes))]
    pub async fn update_trip(&self, trip_id: Uuid, changes: TripChanges) -> Result<Uuid, AppError> {
        let mut trip = self.get_trip(trip_id).await?;
        check_dates(changes.starts_at, changes.ends_at, Utc::now())?;

        trip.destination = changes.destination;
        trip.starts_at = changes.starts_at;
        trip.ends_at = changes.ends_at;
        self.store.update_trip(&trip).await?;
        info!("trip updated");

        Ok(trip.id)
    }

    #[instrument(skip(self))]
    pub async fn create_invite(&self, trip_id: Uuid, email: String) -> Result<Uuid, AppError> {
        let trip = self.get_trip(trip_id).await?;

        let participant = Participant::invitee(trip.id, email);
        self.store.insert_participant(&participant).await?;
        info!(participant_id = %participant.id, "participant invited");

        let message = notifications::trip_invite(&self.links, &trip, &participant)?;
        self.mailer.send(message).await?;

        Ok(participant.id)
    }

    /// Confirms the trip and invites every non-owner participant. Returns the
    /// web page to redirect to; a second call is a no-op with the same target.
    #[instrument(skip(self))]
    pub async fn confirm_trip(&self, trip_id: Uuid) -> Result<String, AppError> {
        let trip = self.get_trip(trip_id).await?;
        let redirect = self.links.trip_page(trip.id);

        if trip.is_confirmed {
            debug!("trip already confirmed");
            return Ok(redirect);
        }

        if !self.store.mark_trip_confirmed(trip.id).await? {
            debug!("trip confirmed concurrently");
            return Ok(redirect);
        }

        let invitees = self.store.list_invitees(trip.id).await?;
        let messages = invitees
            .iter()
            .map(|participant| notifications::trip_invite(&self.links, &trip, participant))
            .collect::<Result<Vec<_>, _>>()?;
        let handles = mail::send_all(self.mailer.as_ref(), messages).await?;
        info!(sent = handles.len(), "trip confirmed");

        Ok(redirect)
    }

    #[instrument(skip(self))]
    pub async fn confirm_participant(&self, participant_id: Uuid) -> Result<String, AppError> {
        let participant = self.get_participant(participant_id).await?;

        if participant.is_confirmed
            || !self.store.mark_participant_confirmed(participant.id).await?
        {
            debug!("participant already confirmed");
        } else {
            info!("participant confirmed");
        }

        Ok(self.links.trip_page(participant.trip_id))
    }

    pub async fn get_participants(&self, trip_id: Uuid) -> Result<Vec<Participant>, AppError> {
        let trip = self.get_trip(trip_id).await?;
        self.store.list_participants(trip.id).await
    }

    pub async fn get_participant(&self, participant_id: Uuid) -> Result<Participant, AppError> {
        self.store
            .find_participant(participant_id)
            .await?
            .ok_or_else(AppError::participant_not_found)
    }
}

/// Longest trip accepted; keeps the per-day agenda bounded.
pub const MAX_TRIP_DAYS: i64 = 366;

/// Start strictly after `now`; end not before start and at most
/// [`MAX_TRIP_DAYS`] after it.
pub fn check_dates(
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if starts_at <= now {
        return Err(AppError::client("start date must be in the future"));
    }
    if ends_at < starts_at {
        return Err(AppError::client("end date must be after start date"));
    }
    if ends_at - starts_at > Duration::days(MAX_TRIP_DAYS) {
        return Err(AppError::client(format!(
            "trip cannot last longer than {MAX_TRIP_DAYS} days"
        )));
    }
    Ok(())
}
