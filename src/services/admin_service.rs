use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::UserStore;
use crate::error::{AppError, AppResult};
use crate::models::{Landmark, NewLandmark, NotificationKind, UserProfile};
use crate::services::notification_service::{self, NotificationDraft};
use crate::services::search_service;
use crate::state::AppState;

pub const ADMIN_ROLE: &str = "admin";
const DEFAULT_LIST_LIMIT: usize = 5;

pub async fn require_admin(users: &dyn UserStore, user_id: &str) -> AppResult<UserProfile> {
    let Some(user) = users.find_user(user_id).await? else {
        return Err(AppError::Forbidden);
    };
    if user.role != ADMIN_ROLE {
        return Err(AppError::Forbidden);
    }
    Ok(user)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total: usize,
    pub pending: usize,
    pub published: usize,
    pub pending_label: String,
    pub published_label: String,
}

pub fn compute_stats(landmarks: &[Landmark]) -> AdminStats {
    let mut pending = 0;
    let mut published = 0;
    for landmark in landmarks {
        match landmark.status.to_lowercase().as_str() {
            "pending" => pending += 1,
            "published" => published += 1,
            _ => {}
        }
    }

    AdminStats {
        total: landmarks.len(),
        pending,
        published,
        pending_label: format!("{:02}", pending),
        published_label: if published >= 1000 {
            format!("{}.{}k", published / 1000, (published % 1000) / 100)
        } else {
            published.to_string()
        },
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AdminListQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub city: String,
    pub image_url: String,
    pub status_label: String,
    pub is_featured: bool,
    pub is_trending: bool,
    pub is_historical: bool,
    pub entry_fee: String,
    pub created_at: i64,
}

impl From<Landmark> for AdminRow {
    fn from(l: Landmark) -> Self {
        let status = if l.status.is_empty() {
            "unknown".to_string()
        } else {
            l.status
        };
        AdminRow {
            status_label: status.to_uppercase(),
            id: l.id,
            name: l.name,
            category: l.category,
            city: l.location.city,
            image_url: l.image_url,
            is_featured: l.is_featured,
            is_trending: l.is_trending,
            is_historical: l.is_historical,
            entry_fee: l.entry_fee,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub rows: Vec<AdminRow>,
    pub showing_label: String,
}

pub async fn build_dashboard(state: &AppState, query: &AdminListQuery) -> AppResult<AdminDashboard> {
    let all = state.landmarks.list_landmarks().await?;
    let stats = compute_stats(&all);
    let matching = search_service::name_or_city_search(&all, query.q.as_deref().unwrap_or(""));
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(1);

    let rows: Vec<AdminRow> = matching.into_iter().take(limit).map(AdminRow::from).collect();
    Ok(AdminDashboard {
        showing_label: format!("Showing {} of {}", rows.len(), all.len()),
        stats,
        rows,
    })
}

fn validate_new_landmark(new: &NewLandmark) -> AppResult<()> {
    if new.name.trim().is_empty() {
        return Err(AppError::validation("name", "Name is required"));
    }
    if new.category.trim().is_empty() {
        return Err(AppError::validation("category", "Category is required"));
    }
    if !(0.0..=5.0).contains(&new.rating) {
        return Err(AppError::validation("rating", "Rating must be between 0 and 5"));
    }
    if new.review_count < 0 {
        return Err(AppError::validation("reviewCount", "Review count cannot be negative"));
    }
    Ok(())
}

pub async fn create_landmark(
    state: &AppState,
    new: NewLandmark,
    now_ms: i64,
) -> AppResult<Landmark> {
    validate_new_landmark(&new)?;
    let landmark = new.into_landmark(Uuid::new_v4().to_string(), now_ms);
    state.landmarks.insert_landmark(&landmark).await?;
    info!("🏛️ Landmark created: {} ({})", landmark.name, landmark.id);

    // The landmark is stored; a failed fan-out must not turn that into an error.
    match state.users.list_user_ids().await {
        Ok(recipients) => {
            let draft =
                NotificationDraft::new_landmark(&landmark.id, &landmark.name, &landmark.image_url);
            notification_service::send_to(state.notifications.as_ref(), &recipients, &draft, now_ms)
                .await;
        }
        Err(e) => warn!("🔔 New landmark {} not announced: {}", landmark.id, e),
    }
    Ok(landmark)
}

async fn notify_savers(state: &AppState, landmark: &Landmark, update: &str, now_ms: i64) -> usize {
    let savers = match state.saved.list_savers(&landmark.id).await {
        Ok(savers) => savers,
        Err(e) => {
            warn!("🔔 Savers of {} not notified: {}", landmark.id, e);
            return 0;
        }
    };
    let draft =
        NotificationDraft::site_update(&landmark.id, &landmark.name, update, &landmark.image_url);
    notification_service::send_to(state.notifications.as_ref(), &savers, &draft, now_ms).await
}

pub async fn update_landmark(
    state: &AppState,
    id: &str,
    new: NewLandmark,
    now_ms: i64,
) -> AppResult<Landmark> {
    validate_new_landmark(&new)?;
    let existing = state
        .landmarks
        .find_landmark(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("landmark {}", id)))?;

    let mut landmark = new.into_landmark(existing.id, now_ms);
    landmark.created_at = existing.created_at;
    if !state.landmarks.update_landmark(&landmark).await? {
        return Err(AppError::NotFound(format!("landmark {}", id)));
    }

    notify_savers(state, &landmark, "Details for this landmark were updated", now_ms).await;
    Ok(landmark)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: String,
    #[serde(default)]
    pub status_arabic: String,
}

pub async fn set_status(
    state: &AppState,
    id: &str,
    change: &StatusChange,
    now_ms: i64,
) -> AppResult<Landmark> {
    let status = change.status.trim();
    if status.is_empty() {
        return Err(AppError::validation("status", "Status is required"));
    }
    if !state
        .landmarks
        .update_status(id, status, change.status_arabic.trim(), now_ms)
        .await?
    {
        return Err(AppError::NotFound(format!("landmark {}", id)));
    }

    let landmark = state
        .landmarks
        .find_landmark(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("landmark {}", id)))?;
    notify_savers(state, &landmark, &format!("Status changed to {}", status), now_ms).await;
    Ok(landmark)
}

pub async fn delete_landmark(state: &AppState, id: &str) -> AppResult<()> {
    if !state.landmarks.delete_landmark(id).await? {
        return Err(AppError::NotFound(format!("landmark {}", id)));
    }
    info!("🗑️ Landmark deleted: {}", id);
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

pub async fn broadcast(state: &AppState, broadcast: &Broadcast, now_ms: i64) -> AppResult<usize> {
    if broadcast.title.trim().is_empty() {
        return Err(AppError::validation("title", "Title is required"));
    }
    let draft = match broadcast.kind {
        NotificationKind::Event => NotificationDraft::event(&broadcast.title, &broadcast.message),
        NotificationKind::System => NotificationDraft::system(&broadcast.title, &broadcast.message),
        _ => {
            return Err(AppError::validation(
                "type",
                "Only EVENT and SYSTEM can be broadcast",
            ))
        }
    };
    let recipients = state.users.list_user_ids().await?;
    Ok(notification_service::send_to(state.notifications.as_ref(), &recipients, &draft, now_ms).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{
        LandmarkStore, NewUser, NotificationStore, SavedLandmarkStore, SqliteStore,
    };
    use crate::models::{PendingVerificationRow, SavedLandmarkRow};
    use async_trait::async_trait;
    use crate::services::mail_service::testing::RecordingMailRelay;
    use std::sync::Arc;

    const NOW: i64 = 1_760_000_000_000;

    async fn state_with_users(ids: &[&str]) -> (AppState, Arc<SqliteStore>) {
        let store = Arc::new(SqliteStore::in_memory().await.unwrap());
        for id in ids {
            store
                .insert_verified_user(NewUser {
                    user_id: id,
                    full_name: "Test User",
                    email: &format!("{id}@example.com"),
                    phone: "0999000000",
                    city: None,
                    created_at: NOW,
                })
                .await
                .unwrap();
        }
        let state = AppState::new(store.clone(), Arc::new(RecordingMailRelay::default()));
        (state, store)
    }

    // Reads of recipients fail; everything else goes to the real store.
    struct RecipientsDown(Arc<SqliteStore>);

    #[async_trait]
    impl UserStore for RecipientsDown {
        async fn find_user(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
            self.0.find_user(user_id).await
        }
        async fn find_user_id_by_email(&self, email: &str) -> AppResult<Option<String>> {
            self.0.find_user_id_by_email(email).await
        }
        async fn insert_verified_user(&self, user: NewUser<'_>) -> AppResult<()> {
            self.0.insert_verified_user(user).await
        }
        async fn update_profile(
            &self,
            user_id: &str,
            full_name: &str,
            email: &str,
            phone: &str,
            city: &str,
        ) -> AppResult<bool> {
            self.0.update_profile(user_id, full_name, email, phone, city).await
        }
        async fn list_user_ids(&self) -> AppResult<Vec<String>> {
            Err(AppError::Store(sqlx::Error::PoolTimedOut))
        }
        async fn upsert_pending(&self, pending: &PendingVerificationRow) -> AppResult<()> {
            self.0.upsert_pending(pending).await
        }
        async fn find_pending(&self, email: &str) -> AppResult<Option<PendingVerificationRow>> {
            self.0.find_pending(email).await
        }
        async fn delete_pending(&self, email: &str) -> AppResult<()> {
            self.0.delete_pending(email).await
        }
    }

    #[async_trait]
    impl SavedLandmarkStore for RecipientsDown {
        async fn add_saved(&self, user_id: &str, landmark_id: &str, saved_at: i64) -> AppResult<()> {
            self.0.add_saved(user_id, landmark_id, saved_at).await
        }
        async fn remove_saved(&self, user_id: &str, landmark_id: &str) -> AppResult<()> {
            self.0.remove_saved(user_id, landmark_id).await
        }
        async fn is_saved(&self, user_id: &str, landmark_id: &str) -> AppResult<bool> {
            self.0.is_saved(user_id, landmark_id).await
        }
        async fn list_saved(&self, user_id: &str) -> AppResult<Vec<SavedLandmarkRow>> {
            self.0.list_saved(user_id).await
        }
        async fn list_savers(&self, _landmark_id: &str) -> AppResult<Vec<String>> {
            Err(AppError::Store(sqlx::Error::PoolTimedOut))
        }
    }

    fn with_status(id: &str, status: &str) -> Landmark {
        Landmark {
            id: id.into(),
            status: status.into(),
            ..Landmark::default()
        }
    }

    #[test]
    fn stats_count_status_case_insensitively() {
        let list = vec![
            with_status("a", "Pending"),
            with_status("b", "PUBLISHED"),
            with_status("c", "published"),
            with_status("d", ""),
        ];
        let stats = compute_stats(&list);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.published, 2);
        assert_eq!(stats.pending_label, "01");
        assert_eq!(stats.published_label, "2");
    }

    #[test]
    fn large_published_count_is_abbreviated() {
        let list: Vec<Landmark> = (0..1250)
            .map(|i| with_status(&i.to_string(), "published"))
            .collect();
        assert_eq!(compute_stats(&list).published_label, "1.2k");
    }

    #[test]
    fn admin_row_labels_missing_status() {
        let row = AdminRow::from(with_status("x", ""));
        assert_eq!(row.status_label, "UNKNOWN");
    }

    #[tokio::test]
    async fn only_admins_pass() {
        let (state, store) = state_with_users(&["plain"]).await;
        sqlx::query("UPDATE users SET role = 'admin' WHERE user_id = 'plain'")
            .execute(store.pool())
            .await
            .unwrap();
        assert!(require_admin(state.users.as_ref(), "plain").await.is_ok());
        let err = require_admin(state.users.as_ref(), "ghost").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn regular_user_is_forbidden() {
        let (state, _store) = state_with_users(&["u1"]).await;
        let err = require_admin(state.users.as_ref(), "u1").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[tokio::test]
    async fn create_notifies_everyone_and_update_notifies_savers() {
        let (state, store) = state_with_users(&["u1", "u2"]).await;
        let created = create_landmark(
            &state,
            NewLandmark {
                name: "Mari".into(),
                category: "Archaeological".into(),
                status: "Pending".into(),
                ..NewLandmark::default()
            },
            NOW,
        )
        .await
        .unwrap();
        assert_eq!(created.created_at, NOW);
        assert_eq!(store.list_notifications("u1").await.unwrap().len(), 1);
        assert_eq!(store.list_notifications("u2").await.unwrap().len(), 1);

        store.add_saved("u2", &created.id, NOW).await.unwrap();
        let changed = set_status(
            &state,
            &created.id,
            &StatusChange {
                status: "Published".into(),
                status_arabic: "منشور".into(),
            },
            NOW + 5,
        )
        .await
        .unwrap();
        assert_eq!(changed.status, "Published");
        assert_eq!(changed.updated_at, NOW + 5);

        let u2 = store.list_notifications("u2").await.unwrap();
        assert_eq!(u2.len(), 2);
        assert_eq!(u2[0].kind, NotificationKind::SiteUpdate);
        assert_eq!(u2[0].description, "Status changed to Published");
        assert_eq!(store.list_notifications("u1").await.unwrap().len(), 1);

        let updated = update_landmark(
            &state,
            &created.id,
            NewLandmark {
                name: "Mari (Tell Hariri)".into(),
                category: "Archaeological".into(),
                ..NewLandmark::default()
            },
            NOW + 10,
        )
        .await
        .unwrap();
        assert_eq!(updated.created_at, NOW);
        assert_eq!(updated.updated_at, NOW + 10);
        assert_eq!(store.list_notifications("u2").await.unwrap().len(), 3);

        let dashboard = build_dashboard(
            &state,
            &AdminListQuery {
                q: Some("hariri".into()),
                limit: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(dashboard.rows.len(), 1);
        assert_eq!(dashboard.showing_label, "Showing 1 of 1");

        delete_landmark(&state, &created.id).await.unwrap();
        let err = delete_landmark(&state, &created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn invalid_landmark_is_rejected_without_writing() {
        let (state, store) = state_with_users(&["u1"]).await;
        let err = create_landmark(&state, NewLandmark::default(), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "name", .. }));
        assert!(store.list_landmarks().await.unwrap().is_empty());
        assert!(store.list_notifications("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn broadcast_rejects_landmark_kind() {
        let (state, store) = state_with_users(&["u1", "u2"]).await;
        let sent = broadcast(
            &state,
            &Broadcast {
                kind: NotificationKind::Event,
                title: "Festival".into(),
                message: "Tonight at the citadel".into(),
            },
            NOW,
        )
        .await
        .unwrap();
        assert_eq!(sent, 2);
        assert_eq!(store.list_notifications("u2").await.unwrap()[0].kind, NotificationKind::Event);

        let err = broadcast(
            &state,
            &Broadcast {
                kind: NotificationKind::Landmark,
                title: "x".into(),
                message: "y".into(),
            },
            NOW,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "type", .. }));
    }

    #[tokio::test]
    async fn create_succeeds_once_when_recipients_cannot_be_read() {
        let (mut state, store) = state_with_users(&["u1"]).await;
        state.users = Arc::new(RecipientsDown(store.clone()));

        let created = create_landmark(
            &state,
            NewLandmark {
                name: "Ain Dara".into(),
                category: "Archaeological".into(),
                ..NewLandmark::default()
            },
            NOW,
        )
        .await
        .unwrap();

        let stored = store.list_landmarks().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, created.id);
        assert!(store.list_notifications("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edits_succeed_when_savers_cannot_be_read() {
        let (mut state, store) = state_with_users(&["u1"]).await;
        let created = create_landmark(
            &state,
            NewLandmark {
                name: "Rasafa".into(),
                category: "Historical".into(),
                ..NewLandmark::default()
            },
            NOW,
        )
        .await
        .unwrap();
        store.add_saved("u1", &created.id, NOW).await.unwrap();
        state.saved = Arc::new(RecipientsDown(store.clone()));

        let changed = set_status(
            &state,
            &created.id,
            &StatusChange {
                status: "Published".into(),
                status_arabic: "منشور".into(),
            },
            NOW + 5,
        )
        .await
        .unwrap();
        assert_eq!(changed.status, "Published");

        let updated = update_landmark(
            &state,
            &created.id,
            NewLandmark {
                name: "Rusafa".into(),
                category: "Historical".into(),
                ..NewLandmark::default()
            },
            NOW + 10,
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Rusafa");

        // Only the creation announcement reached u1.
        assert_eq!(store.list_notifications("u1").await.unwrap().len(), 1);
        assert_eq!(store.list_landmarks().await.unwrap().len(), 1);
    }
}
