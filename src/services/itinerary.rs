use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{activity::Activity, link::Link, trip::Trip},
    services::storage::TripStore,
};

#[derive(Debug, Clone, Serialize)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
}

/// Activities and links attached to a trip.
#[derive(Clone)]
pub struct ItineraryService {
    store: TripStore,
}

impl ItineraryService {
    pub fn new(store: TripStore) -> Self {
        Self { store }
    }

    async fn trip(&self, trip_id: Uuid) -> Result<Trip, AppError> {
        self.store
            .find_trip(trip_id)
            .await?
            .ok_or_else(AppError::trip_not_found)
    }

    pub async fn create_activity(
        &self,
        trip_id: Uuid,
        title: String,
        occurs_at: DateTime<Utc>,
    ) -> Result<Uuid, AppError> {
        let trip = self.trip(trip_id).await?;
        if !trip.covers(occurs_at) {
            return Err(AppError::client("invalid activity date"));
        }

        let activity = Activity {
            id: Uuid::new_v4(),
            trip_id: trip.id,
            title,
            occurs_at,
        };
        self.store.insert_activity(&activity).await?;
        info!(trip_id = %trip.id, activity_id = %activity.id, "activity created");
        Ok(activity.id)
    }

    pub async fn agenda(&self, trip_id: Uuid) -> Result<Vec<AgendaDay>, AppError> {
        let trip = self.trip(trip_id).await?;
        let activities = self.store.list_activities(trip.id).await?;
        Ok(group_by_day(&trip, activities))
    }

    pub async fn create_link(
        &self,
        trip_id: Uuid,
        title: String,
        url: String,
    ) -> Result<Uuid, AppError> {
        let trip = self.trip(trip_id).await?;
        let link = Link {
            id: Uuid::new_v4(),
            trip_id: trip.id,
            title,
            url,
        };
        self.store.insert_link(&link).await?;
        info!(trip_id = %trip.id, link_id = %link.id, "link created");
        Ok(link.id)
    }

    pub async fn links(&self, trip_id: Uuid) -> Result<Vec<Link>, AppError> {
        let trip = self.trip(trip_id).await?;
        self.store.list_links(trip.id).await
    }
}

/// One entry per calendar day (UTC) the trip spans, even empty ones.
pub fn group_by_day(trip: &Trip, mut activities: Vec<Activity>) -> Vec<AgendaDay> {
    activities.sort_by_key(|activity| activity.occurs_at);

    let first = trip.starts_at.date_naive();
    let last = trip.ends_at.date_naive();
    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|date| AgendaDay {
            date,
            activities: activities
                .iter()
                .filter(|activity| activity.occurs_at.date_naive() == date)
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn activity(trip: &Trip, title: &str, occurs_at: DateTime<Utc>) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            trip_id: trip.id,
            title: title.into(),
            occurs_at,
        }
    }

    #[test]
    fn agenda_covers_every_trip_day() {
        let trip = Trip::new(
            "Lisbon",
            Utc.with_ymd_and_hms(2031, 3, 30, 22, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2031, 4, 2, 8, 0, 0).unwrap(),
        );
        let dinner = activity(
            &trip,
            "Dinner",
            Utc.with_ymd_and_hms(2031, 3, 30, 23, 0, 0).unwrap(),
        );
        let museum = activity(
            &trip,
            "Museum",
            Utc.with_ymd_and_hms(2031, 4, 1, 15, 0, 0).unwrap(),
        );
        let brunch = activity(
            &trip,
            "Brunch",
            Utc.with_ymd_and_hms(2031, 4, 1, 10, 0, 0).unwrap(),
        );

        let days = group_by_day(&trip, vec![dinner, museum, brunch]);

        let dates: Vec<_> = days.iter().map(|day| day.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2031-03-30", "2031-03-31", "2031-04-01", "2031-04-02"]
        );
        assert_eq!(days[0].activities.len(), 1);
        assert!(days[1].activities.is_empty());
        let titles: Vec<_> = days[2]
            .activities
            .iter()
            .map(|activity| activity.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Brunch", "Museum"]);
    }

    #[test]
    fn single_day_trip_has_one_entry() {
        let start = Utc.with_ymd_and_hms(2031, 5, 1, 9, 0, 0).unwrap();
        let trip = Trip::new("Porto", start, start);
        assert_eq!(group_by_day(&trip, Vec::new()).len(), 1);
    }
}
