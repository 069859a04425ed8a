use std::sync::Arc;

use crate::database::{LandmarkStore, NotificationStore, SavedLandmarkStore, SqliteStore, UserStore};
use crate::services::home_service::HomeFeed;
use crate::services::mail_service::MailRelay;
use crate::services::screen_service::{ScreenHandle, ScreenLifetime};

#[derive(Clone)]
pub struct AppState {
    pub landmarks: Arc<dyn LandmarkStore>,
    pub saved: Arc<dyn SavedLandmarkStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub users: Arc<dyn UserStore>,
    pub mail: Arc<dyn MailRelay>,
    pub home: HomeFeed,
    // Closes the live home feed once the last clone of the state is dropped.
    _home_session: Arc<ScreenHandle>,
}

impl AppState {
    pub fn new(store: Arc<SqliteStore>, mail: Arc<dyn MailRelay>) -> Self {
        let landmarks: Arc<dyn LandmarkStore> = store.clone();
        let (handle, lifetime) = ScreenLifetime::open();
        let home = HomeFeed::spawn(landmarks.clone(), lifetime);

        Self {
            landmarks,
            saved: store.clone(),
            notifications: store.clone(),
            users: store,
            mail,
            home,
            _home_session: Arc::new(handle),
        }
    }
}
