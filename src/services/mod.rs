pub mod itinerary;
pub mod mail;
pub mod notifications;
pub mod storage;
pub mod trips;
