mod common;

use chrono::{Duration, Utc};
use common::TestApp;
use planner::services::trips::NewTrip;

fn new_trip() -> NewTrip {
    let starts_at = Utc::now() + Duration::days(3);
    NewTrip {
        destination: "Lisbon".into(),
        starts_at,
        ends_at: starts_at + Duration::days(4),
        owner_name: "Alice".into(),
        owner_email: "a@example.com".into(),
        emails_to_invite: vec!["b@example.com".into(), "c@example.com".into()],
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_trip_confirmations_invite_each_participant_once() {
    let app = TestApp::new().await.unwrap();

    for _ in 0..10 {
        let trip_id = app.state.trips.create_trip(new_trip()).await.unwrap();
        app.mailer.clear();

        let first = tokio::spawn({
            let trips = app.state.trips.clone();
            async move { trips.confirm_trip(trip_id).await }
        });
        let second = tokio::spawn({
            let trips = app.state.trips.clone();
            async move { trips.confirm_trip(trip_id).await }
        });

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();
        assert_eq!(first, second);

        let mut recipients: Vec<_> = app
            .mailer
            .sent()
            .into_iter()
            .map(|message| message.to.address)
            .collect();
        recipients.sort();
        assert_eq!(recipients, vec!["b@example.com", "c@example.com"]);

        let trip = app.state.trips.get_trip(trip_id).await.unwrap();
        assert!(trip.is_confirmed);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_participant_confirmations_both_redirect() {
    let app = TestApp::new().await.unwrap();
    let trip_id = app.state.trips.create_trip(new_trip()).await.unwrap();
    let participant_id = app
        .state
        .trips
        .create_invite(trip_id, "d@example.com".into())
        .await
        .unwrap();

    let confirmations: Vec<_> = (0..2)
        .map(|_| {
            let trips = app.state.trips.clone();
            tokio::spawn(async move { trips.confirm_participant(participant_id).await })
        })
        .collect();
    for confirmation in confirmations {
        let redirect = confirmation.await.unwrap().unwrap();
        assert!(redirect.ends_with(&format!("/trips/{trip_id}")));
    }

    let participant = app.state.trips.get_participant(participant_id).await.unwrap();
    assert!(participant.is_confirmed);
}
