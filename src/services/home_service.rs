use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::database::LandmarkStore;
use crate::error::AppResult;
use crate::models::Landmark;
use crate::services::screen_service::{ListState, ScreenLifetime};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub featured: Vec<Landmark>,
    pub trending: Vec<Landmark>,
    pub is_empty: bool,
    pub notice: Option<String>,
}

#[derive(Clone)]
pub struct HomeFeed {
    state: Arc<watch::Sender<ListState<Landmark>>>,
}

impl HomeFeed {
    pub fn spawn(store: Arc<dyn LandmarkStore>, lifetime: ScreenLifetime) -> Self {
        let state = Arc::new(watch::Sender::new(ListState::default()));
        let tx = state.clone();
        // Subscribe before the first fetch so no write slips between the two.
        let mut changes = store.subscribe();

        tokio::spawn(async move {
            loop {
                let Some(result) = lifetime.run(store.list_landmarks()).await else {
                    break;
                };
                tx.send_modify(|state| state.apply(result));

                tokio::select! {
                    _ = lifetime.closed() => break,
                    change = changes.recv() => match change {
                        Ok(change) => debug!("Home feed refresh after {:?}", change),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Home feed skipped {} landmark changes, refreshing", skipped)
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            info!("🏠 Home feed stopped");
        });

        Self { state }
    }

    // Current rows. A pending refresh notice is handed out once and then
    // cleared; the rows stay.
    pub fn snapshot(&self) -> ListState<Landmark> {
        let mut snapshot = ListState::default();
        self.state.send_if_modified(|state| {
            snapshot = state.clone();
            state.take_notice();
            false
        });
        snapshot
    }

    #[cfg(test)]
    fn subscribe(&self) -> watch::Receiver<ListState<Landmark>> {
        self.state.subscribe()
    }
}

pub fn build_home_page(state: &ListState<Landmark>) -> HomePage {
    let featured: Vec<Landmark> = state.items.iter().filter(|l| l.is_featured).cloned().collect();
    let trending: Vec<Landmark> = state.items.iter().filter(|l| l.is_trending).cloned().collect();

    HomePage {
        is_empty: featured.is_empty() && trending.is_empty(),
        featured,
        trending,
        notice: state.notice.clone(),
    }
}

pub async fn load_home_page(feed: &HomeFeed, store: &dyn LandmarkStore) -> AppResult<HomePage> {
    let snapshot = feed.snapshot();
    if snapshot.loaded {
        return Ok(build_home_page(&snapshot));
    }

    let mut state = ListState::default();
    state.apply(Ok(store.list_landmarks().await?));
    Ok(build_home_page(&state))
}
