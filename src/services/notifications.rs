use askama::Template;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::AppError,
    models::{participant::Participant, trip::Trip},
    services::mail::{MailMessage, Mailbox},
};

/// Builds the URLs that end up in emails and redirects.
#[derive(Debug, Clone)]
pub struct Links {
    pub web_base_url: String,
    pub api_base_url: String,
    pub sender: Mailbox,
}

impl Links {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            web_base_url: config.web_base_url.clone(),
            api_base_url: config.api_base_url.clone(),
            sender: Mailbox::new(&config.mail_from_name, &config.mail_from_address),
        }
    }

    pub fn trip_confirmation(&self, trip_id: Uuid) -> String {
        format!("{}/trips/{trip_id}/confirm", self.api_base_url)
    }

    pub fn participant_confirmation(&self, participant_id: Uuid) -> String {
        format!(
            "{}/trips/participants/{participant_id}/confirm",
            self.api_base_url
        )
    }

    pub fn trip_page(&self, trip_id: Uuid) -> String {
        format!("{}/trips/{trip_id}", self.web_base_url)
    }
}

#[derive(Template)]
#[template(path = "mail/trip_created.html")]
struct TripCreatedTemplate<'a> {
    destination: &'a str,
    starts_on: String,
    ends_on: String,
    confirmation_link: String,
}

#[derive(Template)]
#[template(path = "mail/trip_invite.html")]
struct TripInviteTemplate<'a> {
    destination: &'a str,
    starts_on: String,
    ends_on: String,
    confirmation_link: String,
}

/// Long date form, e.g. `October 19, 2026`.
pub fn long_date(ts: DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y").to_string()
}

/// Email asking the owner to confirm a freshly created trip.
pub fn trip_created(
    links: &Links,
    trip: &Trip,
    owner: &Participant,
) -> Result<MailMessage, AppError> {
    let html = TripCreatedTemplate {
        destination: &trip.destination,
        starts_on: long_date(trip.starts_at),
        ends_on: long_date(trip.ends_at),
        confirmation_link: links.trip_confirmation(trip.id),
    }
    .render()?;

    Ok(MailMessage {
        from: links.sender.clone(),
        to: recipient(owner),
        subject: format!(
            "Confirm your trip to {} on {}",
            trip.destination,
            long_date(trip.starts_at)
        ),
        html,
    })
}

/// Email asking an invitee to confirm their presence.
pub fn trip_invite(
    links: &Links,
    trip: &Trip,
    participant: &Participant,
) -> Result<MailMessage, AppError> {
    let html = TripInviteTemplate {
        destination: &trip.destination,
        starts_on: long_date(trip.starts_at),
        ends_on: long_date(trip.ends_at),
        confirmation_link: links.participant_confirmation(participant.id),
    }
    .render()?;

    Ok(MailMessage {
        from: links.sender.clone(),
        to: recipient(participant),
        subject: format!(
            "You're invited to {} on {}",
            trip.destination,
            long_date(trip.starts_at)
        ),
        html,
    })
}

fn recipient(participant: &Participant) -> Mailbox {
    match &participant.name {
        Some(name) => Mailbox::new(name, &participant.email),
        None => Mailbox::address(&participant.email),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn links() -> Links {
        Links {
            web_base_url: "http://web.test".into(),
            api_base_url: "http://api.test".into(),
            sender: Mailbox::new("Trip Planner", "contato@planner.com.br"),
        }
    }

    fn trip() -> Trip {
        Trip::new(
            "Paris & Lyon",
            Utc.with_ymd_and_hms(2031, 7, 4, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2031, 7, 12, 18, 0, 0).unwrap(),
        )
    }

    #[test]
    fn long_date_has_no_padding() {
        let ts = Utc.with_ymd_and_hms(2031, 7, 4, 10, 0, 0).unwrap();
        assert_eq!(long_date(ts), "July 4, 2031");
    }

    #[test]
    fn owner_mail_links_to_trip_confirmation() {
        let trip = trip();
        let owner = Participant::owner(trip.id, "Alice", "a@example.com");
        let message = trip_created(&links(), &trip, &owner).unwrap();

        let expected = format!("http://api.test/trips/{}/confirm", trip.id);
        assert!(message.html.contains(&expected));
        assert!(message.html.contains("July 4, 2031"));
        assert!(message.html.contains("July 12, 2031"));
        assert!(message.html.contains("Paris &amp; Lyon"));
        assert_eq!(message.to, Mailbox::new("Alice", "a@example.com"));
    }

    #[test]
    fn invite_mail_links_to_participant_confirmation() {
        let trip = trip();
        let invitee = Participant::invitee(trip.id, "b@example.com");
        let message = trip_invite(&links(), &trip, &invitee).unwrap();

        let expected = format!("http://api.test/trips/participants/{}/confirm", invitee.id);
        assert!(message.html.contains(&expected));
        assert_eq!(message.to, Mailbox::address("b@example.com"));
        assert_eq!(message.from.address, "contato@planner.com.br");
    }

    #[test]
    fn trip_page_uses_web_base() {
        let id = Uuid::nil();
        assert_eq!(
            links().trip_page(id),
            "http://web.test/trips/00000000-0000-0000-0000-000000000000"
        );
    }
}
