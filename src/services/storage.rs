use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{activity::Activity, link::Link, participant::Participant, trip::Trip},
};

const TRIP_COLUMNS: &str = "id, destination, starts_at, ends_at, is_confirmed, created_at";
const PARTICIPANT_COLUMNS: &str = "id, trip_id, name, email, is_owner, is_confirmed";
const INSERT_PARTICIPANT: &str = r#"INSERT INTO participants (id, trip_id, name, email, is_owner, is_confirmed)
    VALUES (?, ?, ?, ?, ?, ?)"#;

/// SQLite-backed persistence for trips and everything hanging off them.
#[derive(Clone)]
pub struct TripStore {
    db: DbPool,
}

impl TripStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Inserts the trip and its initial participants in one transaction.
    pub async fn insert_trip(
        &self,
        trip: &Trip,
        participants: &[Participant],
    ) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"INSERT INTO trips (id, destination, starts_at, ends_at, is_confirmed, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(trip.id)
        .bind(&trip.destination)
        .bind(trip.starts_at)
        .bind(trip.ends_at)
        .bind(trip.is_confirmed)
        .bind(trip.created_at)
        .execute(&mut *tx)
        .await?;

        for participant in participants {
            sqlx::query(INSERT_PARTICIPANT)
                .bind(participant.id)
                .bind(participant.trip_id)
                .bind(&participant.name)
                .bind(&participant.email)
                .bind(participant.is_owner)
                .bind(participant.is_confirmed)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_trip(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip =
            sqlx::query_as::<_, Trip>(&format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.db)
                .await?;
        Ok(trip)
    }

    pub async fn update_trip(&self, trip: &Trip) -> Result<(), AppError> {
        sqlx::query("UPDATE trips SET destination = ?, starts_at = ?, ends_at = ? WHERE id = ?")
            .bind(&trip.destination)
            .bind(trip.starts_at)
            .bind(trip.ends_at)
            .bind(trip.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// Flips the flag once. Returns false when another caller got there first.
    pub async fn mark_trip_confirmed(&self, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE trips SET is_confirmed = 1 WHERE id = ? AND is_confirmed = 0")
                .bind(id)
                .execute(&self.db)
                .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn insert_participant(&self, participant: &Participant) -> Result<(), AppError> {
        sqlx::query(INSERT_PARTICIPANT)
            .bind(participant.id)
            .bind(participant.trip_id)
            .bind(&participant.name)
            .bind(&participant.email)
            .bind(participant.is_owner)
            .bind(participant.is_confirmed)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn find_participant(&self, id: Uuid) -> Result<Option<Participant>, AppError> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(participant)
    }

    /// Owner first, then invitees in insertion order.
    pub async fn list_participants(&self, trip_id: Uuid) -> Result<Vec<Participant>, AppError> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE trip_id = ? ORDER BY is_owner DESC, rowid ASC"
        ))
        .bind(trip_id)
        .fetch_all(&self.db)
        .await?;
        Ok(participants)
    }

    pub async fn list_invitees(&self, trip_id: Uuid) -> Result<Vec<Participant>, AppError> {
        let invitees = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE trip_id = ? AND is_owner = 0 ORDER BY rowid ASC"
        ))
        .bind(trip_id)
        .fetch_all(&self.db)
        .await?;
        Ok(invitees)
    }

    pub async fn mark_participant_confirmed(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE participants SET is_confirmed = 1 WHERE id = ? AND is_confirmed = 0",
        )
        .bind(id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn insert_activity(&self, activity: &Activity) -> Result<(), AppError> {
        sqlx::query("INSERT INTO activities (id, trip_id, title, occurs_at) VALUES (?, ?, ?, ?)")
            .bind(activity.id)
            .bind(activity.trip_id)
            .bind(&activity.title)
            .bind(activity.occurs_at)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn list_activities(&self, trip_id: Uuid) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT id, trip_id, title, occurs_at FROM activities WHERE trip_id = ? ORDER BY occurs_at ASC",
        )
        .bind(trip_id)
        .fetch_all(&self.db)
        .await?;
        Ok(activities)
    }

    pub async fn insert_link(&self, link: &Link) -> Result<(), AppError> {
        sqlx::query("INSERT INTO links (id, trip_id, title, url) VALUES (?, ?, ?, ?)")
            .bind(link.id)
            .bind(link.trip_id)
            .bind(&link.title)
            .bind(&link.url)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    pub async fn list_links(&self, trip_id: Uuid) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            "SELECT id, trip_id, title, url FROM links WHERE trip_id = ? ORDER BY rowid ASC",
        )
        .bind(trip_id)
        .fetch_all(&self.db)
        .await?;
        Ok(links)
    }
}
