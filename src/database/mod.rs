//! Store traits for the guide and their SQLite implementation.

pub mod landmarks_repo;
pub mod notifications_repo;
pub mod saved_landmarks_repo;
pub mod schema;
pub mod users_repo;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::AppResult;
use crate::models::{
    Landmark, Notification, PendingVerificationRow, SavedLandmarkRow, UserProfile,
};

pub use notifications_repo::NewNotification;
pub use users_repo::NewUser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandmarkChange {
    Upserted(String),
    Removed(String),
}

#[async_trait]
pub trait LandmarkStore: Send + Sync {
    async fn list_landmarks(&self) -> AppResult<Vec<Landmark>>;
    async fn find_landmark(&self, id: &str) -> AppResult<Option<Landmark>>;
    async fn insert_landmark(&self, landmark: &Landmark) -> AppResult<()>;
    async fn update_landmark(&self, landmark: &Landmark) -> AppResult<bool>;
    async fn update_status(
        &self,
        id: &str,
        status: &str,
        status_arabic: &str,
        updated_at: i64,
    ) -> AppResult<bool>;
    async fn delete_landmark(&self, id: &str) -> AppResult<bool>;
    fn subscribe(&self) -> broadcast::Receiver<LandmarkChange>;
}

#[async_trait]
pub trait SavedLandmarkStore: Send + Sync {
    async fn add_saved(&self, user_id: &str, landmark_id: &str, saved_at: i64) -> AppResult<()>;
    async fn remove_saved(&self, user_id: &str, landmark_id: &str) -> AppResult<()>;
    async fn is_saved(&self, user_id: &str, landmark_id: &str) -> AppResult<bool>;
    async fn list_saved(&self, user_id: &str) -> AppResult<Vec<SavedLandmarkRow>>;
    async fn list_savers(&self, landmark_id: &str) -> AppResult<Vec<String>>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert_notification(&self, notification: NewNotification<'_>) -> AppResult<()>;
    async fn list_notifications(&self, user_id: &str) -> AppResult<Vec<Notification>>;
    async fn mark_read(&self, user_id: &str, notification_id: &str, opened_at: i64)
        -> AppResult<bool>;
    async fn mark_all_read(&self, user_id: &str, opened_at: i64) -> AppResult<u64>;
    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> AppResult<bool>;
    async fn delete_all_notifications(&self, user_id: &str) -> AppResult<u64>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, user_id: &str) -> AppResult<Option<UserProfile>>;
    async fn find_user_id_by_email(&self, email: &str) -> AppResult<Option<String>>;
    async fn insert_verified_user(&self, user: NewUser<'_>) -> AppResult<()>;
    async fn update_profile(
        &self,
        user_id: &str,
        full_name: &str,
        email: &str,
        phone: &str,
        city: &str,
    ) -> AppResult<bool>;
    async fn list_user_ids(&self) -> AppResult<Vec<String>>;
    async fn upsert_pending(&self, pending: &PendingVerificationRow) -> AppResult<()>;
    async fn find_pending(&self, email: &str) -> AppResult<Option<PendingVerificationRow>>;
    async fn delete_pending(&self, email: &str) -> AppResult<()>;
}

pub struct SqliteStore {
    pool: SqlitePool,
    changes: broadcast::Sender<LandmarkChange>,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self { pool, changes }
    }

    pub async fn connect(db_url: &str) -> sqlx::Result<Self> {
        let pool = SqlitePoolOptions::new().connect(db_url).await?;
        schema::ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Single-connection in-memory database; every connection to
    /// `sqlite::memory:` would otherwise see its own empty database.
    pub async fn in_memory() -> sqlx::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        schema::ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn publish(&self, change: LandmarkChange) {
        // No receivers is fine: nobody is watching right now.
        if self.changes.send(change).is_err() {
            debug!("Landmark change published without live subscribers");
        }
    }
}

#[async_trait]
impl LandmarkStore for SqliteStore {
    async fn list_landmarks(&self) -> AppResult<Vec<Landmark>> {
        Ok(landmarks_repo::list_landmarks(&self.pool).await?)
    }

    async fn find_landmark(&self, id: &str) -> AppResult<Option<Landmark>> {
        Ok(landmarks_repo::find_landmark(&self.pool, id).await?)
    }

    async fn insert_landmark(&self, landmark: &Landmark) -> AppResult<()> {
        landmarks_repo::insert_landmark(&self.pool, landmark).await?;
        self.publish(LandmarkChange::Upserted(landmark.id.clone()));
        Ok(())
    }

    async fn update_landmark(&self, landmark: &Landmark) -> AppResult<bool> {
        let updated = landmarks_repo::update_landmark(&self.pool, landmark).await? > 0;
        if updated {
            self.publish(LandmarkChange::Upserted(landmark.id.clone()));
        }
        Ok(updated)
    }

    async fn update_status(
        &self,
        id: &str,
        status: &str,
        status_arabic: &str,
        updated_at: i64,
    ) -> AppResult<bool> {
        let updated =
            landmarks_repo::update_status(&self.pool, id, status, status_arabic, updated_at)
                .await?
                > 0;
        if updated {
            self.publish(LandmarkChange::Upserted(id.to_string()));
        }
        Ok(updated)
    }

    async fn delete_landmark(&self, id: &str) -> AppResult<bool> {
        // The landmark and its saves go together or not at all.
        let mut tx = self.pool.begin().await?;
        let deleted = landmarks_repo::delete_landmark(&mut tx, id).await? > 0;
        if deleted {
            saved_landmarks_repo::delete_for_landmark(&mut tx, id).await?;
        }
        tx.commit().await?;

        if deleted {
            self.publish(LandmarkChange::Removed(id.to_string()));
        }
        Ok(deleted)
    }

    fn subscribe(&self) -> broadcast::Receiver<LandmarkChange> {
        self.changes.subscribe()
    }
}

#[async_trait]
impl SavedLandmarkStore for SqliteStore {
    async fn add_saved(&self, user_id: &str, landmark_id: &str, saved_at: i64) -> AppResult<()> {
        Ok(saved_landmarks_repo::insert_saved(&self.pool, user_id, landmark_id, saved_at).await?)
    }

    async fn remove_saved(&self, user_id: &str, landmark_id: &str) -> AppResult<()> {
        Ok(saved_landmarks_repo::delete_saved(&self.pool, user_id, landmark_id).await?)
    }

    async fn is_saved(&self, user_id: &str, landmark_id: &str) -> AppResult<bool> {
        Ok(saved_landmarks_repo::is_saved(&self.pool, user_id, landmark_id).await?)
    }

    async fn list_saved(&self, user_id: &str) -> AppResult<Vec<SavedLandmarkRow>> {
        Ok(saved_landmarks_repo::list_saved_for_user(&self.pool, user_id).await?)
    }

    async fn list_savers(&self, landmark_id: &str) -> AppResult<Vec<String>> {
        Ok(saved_landmarks_repo::list_savers(&self.pool, landmark_id).await?)
    }
}

#[async_trait]
impl NotificationStore for SqliteStore {
    async fn insert_notification(&self, notification: NewNotification<'_>) -> AppResult<()> {
        Ok(notifications_repo::insert_notification(&self.pool, notification).await?)
    }

    async fn list_notifications(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        let rows = notifications_repo::list_for_user(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_read(
        &self,
        user_id: &str,
        notification_id: &str,
        opened_at: i64,
    ) -> AppResult<bool> {
        Ok(notifications_repo::mark_read(&self.pool, user_id, notification_id, opened_at).await? > 0)
    }

    async fn mark_all_read(&self, user_id: &str, opened_at: i64) -> AppResult<u64> {
        Ok(notifications_repo::mark_all_read(&self.pool, user_id, opened_at).await?)
    }

    async fn delete_notification(&self, user_id: &str, notification_id: &str) -> AppResult<bool> {
        Ok(notifications_repo::delete_one(&self.pool, user_id, notification_id).await? > 0)
    }

    async fn delete_all_notifications(&self, user_id: &str) -> AppResult<u64> {
        Ok(notifications_repo::delete_all(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn find_user(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        let row = users_repo::find_user(&self.pool, user_id).await?;
        Ok(row.map(UserProfile::from))
    }

    async fn find_user_id_by_email(&self, email: &str) -> AppResult<Option<String>> {
        Ok(users_repo::find_user_id_by_email(&self.pool, email).await?)
    }

    async fn insert_verified_user(&self, user: NewUser<'_>) -> AppResult<()> {
        Ok(users_repo::insert_verified_user(&self.pool, user).await?)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        full_name: &str,
        email: &str,
        phone: &str,
        city: &str,
    ) -> AppResult<bool> {
        Ok(
            users_repo::update_profile(&self.pool, user_id, full_name, email, phone, city).await?
                > 0,
        )
    }

    async fn list_user_ids(&self) -> AppResult<Vec<String>> {
        Ok(users_repo::list_user_ids(&self.pool).await?)
    }

    async fn upsert_pending(&self, pending: &PendingVerificationRow) -> AppResult<()> {
        Ok(users_repo::upsert_pending(&self.pool, pending).await?)
    }

    async fn find_pending(&self, email: &str) -> AppResult<Option<PendingVerificationRow>> {
        Ok(users_repo::find_pending(&self.pool, email).await?)
    }

    async fn delete_pending(&self, email: &str) -> AppResult<()> {
        Ok(users_repo::delete_pending(&self.pool, email).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LandmarkLocation;

    fn landmark(id: &str, created_at: i64) -> Landmark {
        Landmark {
            id: id.to_string(),
            name: format!("Landmark {id}"),
            category: "Historical".into(),
            rating: 4.0,
            tags: vec!["castle".into()],
            location: LandmarkLocation {
                city: "Raqqa".into(),
                latitude: 35.95,
                longitude: 39.01,
                ..LandmarkLocation::default()
            },
            created_at,
            updated_at: created_at,
            ..Landmark::default()
        }
    }

    #[tokio::test]
    async fn landmark_round_trip_through_sqlite() {
        let store = SqliteStore::in_memory().await.unwrap();
        let mut original = landmark("a", 10);
        original
            .details
            .insert("yearBuilt".into(), serde_json::json!(1134));
        store.insert_landmark(&original).await.unwrap();

        let loaded = store.find_landmark("a").await.unwrap().unwrap();
        assert_eq!(loaded, original);
        assert!(store.find_landmark("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = SqliteStore::in_memory().await.unwrap();
        for (id, at) in [("b", 1), ("a", 2), ("c", 3)] {
            store.insert_landmark(&landmark(id, at)).await.unwrap();
        }
        let ids: Vec<String> = store
            .list_landmarks()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn writes_are_published_to_subscribers() {
        let store = SqliteStore::in_memory().await.unwrap();
        let mut rx = store.subscribe();

        store.insert_landmark(&landmark("a", 1)).await.unwrap();
        assert!(store.update_status("a", "Closed", "مغلق", 2).await.unwrap());
        assert!(store.delete_landmark("a").await.unwrap());

        assert_eq!(rx.recv().await.unwrap(), LandmarkChange::Upserted("a".into()));
        assert_eq!(rx.recv().await.unwrap(), LandmarkChange::Upserted("a".into()));
        assert_eq!(rx.recv().await.unwrap(), LandmarkChange::Removed("a".into()));
    }

    #[tokio::test]
    async fn deleting_a_landmark_drops_its_saves() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.insert_landmark(&landmark("a", 1)).await.unwrap();
        store.add_saved("u1", "a", 5).await.unwrap();
        store.add_saved("u2", "a", 6).await.unwrap();
        assert_eq!(store.list_savers("a").await.unwrap(), vec!["u1", "u2"]);

        store.delete_landmark("a").await.unwrap();
        assert!(store.list_savers("a").await.unwrap().is_empty());
        assert!(!store.is_saved("u1", "a").await.unwrap());
    }

    #[tokio::test]
    async fn failed_delete_keeps_landmark_and_stays_quiet() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.insert_landmark(&landmark("a", 1)).await.unwrap();
        let mut rx = store.subscribe();
        sqlx::query("DROP TABLE saved_landmarks")
            .execute(store.pool())
            .await
            .unwrap();

        assert!(store.delete_landmark("a").await.is_err());
        assert!(store.find_landmark("a").await.unwrap().is_some());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn saved_list_is_newest_first() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.add_saved("u1", "old", 1).await.unwrap();
        store.add_saved("u1", "new", 9).await.unwrap();
        store.add_saved("u2", "other", 5).await.unwrap();

        let ids: Vec<String> = store
            .list_saved("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.landmark_id)
            .collect();
        assert_eq!(ids, vec!["new", "old"]);

        store.remove_saved("u1", "new").await.unwrap();
        assert!(!store.is_saved("u1", "new").await.unwrap());
        assert!(store.is_saved("u1", "old").await.unwrap());
    }
}
