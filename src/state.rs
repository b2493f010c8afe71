use crate::{
    config::AppConfig,
    db::DbPool,
    services::{
        itinerary::ItineraryService, mail::SharedMailer, notifications::Links,
        storage::TripStore, trips::TripService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub trips: TripService,
    pub itinerary: ItineraryService,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool, mailer: SharedMailer) -> Self {
        let store = TripStore::new(db.clone());
        let links = Links::from_config(&config);
        Self {
            trips: TripService::new(store.clone(), mailer, links),
            itinerary: ItineraryService::new(store),
            config,
            db,
        }
    }
}
