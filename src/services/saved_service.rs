use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::database::{LandmarkStore, SavedLandmarkStore};
use crate::error::{AppError, AppResult};
use crate::services::browse_service::LandmarkCard;

pub async fn saved_id_set(
    saved: &dyn SavedLandmarkStore,
    user_id: &str,
) -> AppResult<HashSet<String>> {
    let rows = saved.list_saved(user_id).await?;
    Ok(rows.into_iter().map(|r| r.landmark_id).collect())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkOutcome {
    pub landmark_id: String,
    pub is_bookmarked: bool,
    pub message: String,
    pub rolled_back: bool,
}

/// Flips the viewer's bookmark. The new value is reported optimistically and
/// rolled back to the pre-toggle value if the write fails.
pub async fn toggle_bookmark(
    saved: &dyn SavedLandmarkStore,
    user_id: &str,
    landmark_id: &str,
    now_ms: i64,
) -> AppResult<BookmarkOutcome> {
    if landmark_id.trim().is_empty() {
        return Err(AppError::validation("landmarkId", "Invalid landmark ID"));
    }

    let was_saved = saved.is_saved(user_id, landmark_id).await?;
    let write = if was_saved {
        saved.remove_saved(user_id, landmark_id).await
    } else {
        saved.add_saved(user_id, landmark_id, now_ms).await
    };

    Ok(match write {
        Ok(()) => BookmarkOutcome {
            landmark_id: landmark_id.to_string(),
            is_bookmarked: !was_saved,
            message: if was_saved {
                "Removed from saved".to_string()
            } else {
                "Saved to your collection".to_string()
            },
            rolled_back: false,
        },
        Err(e) => {
            warn!("Bookmark toggle failed for {} / {}: {}", user_id, landmark_id, e);
            let verb = if was_saved { "remove" } else { "save" };
            BookmarkOutcome {
                landmark_id: landmark_id.to_string(),
                is_bookmarked: was_saved,
                message: format!("Failed to {}: {}", verb, e),
                rolled_back: true,
            }
        }
    })
}

pub async fn remove_bookmark(
    saved: &dyn SavedLandmarkStore,
    user_id: &str,
    landmark_id: &str,
) -> AppResult<()> {
    saved.remove_saved(user_id, landmark_id).await
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    #[serde(flatten)]
    pub card: LandmarkCard,
    pub saved_at: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPage {
    pub items: Vec<SavedItem>,
    pub is_empty: bool,
}

// Saves whose landmark is gone are skipped.
pub async fn build_saved_page(
    landmarks: &dyn LandmarkStore,
    saved: &dyn SavedLandmarkStore,
    user_id: &str,
) -> AppResult<SavedPage> {
    let rows = saved.list_saved(user_id).await?;
    if rows.is_empty() {
        return Ok(SavedPage {
            items: Vec::new(),
            is_empty: true,
        });
    }

    let ids: HashSet<String> = rows.iter().map(|r| r.landmark_id.clone()).collect();
    let mut by_id: HashMap<String, _> = landmarks
        .list_landmarks()
        .await?
        .into_iter()
        .filter(|l| ids.contains(&l.id))
        .map(|l| (l.id.clone(), l))
        .collect();

    let items: Vec<SavedItem> = rows
        .into_iter()
        .filter_map(|row| {
            let landmark = by_id.remove(&row.landmark_id)?;
            Some(SavedItem {
                card: LandmarkCard::new(landmark, &ids),
                saved_at: row.saved_at,
            })
        })
        .collect();

    Ok(SavedPage {
        is_empty: items.is_empty(),
        items,
    })
}
