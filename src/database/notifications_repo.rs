use sqlx::SqlitePool;

use crate::models::NotificationRow;

pub struct NewNotification<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub kind: &'a str, // LANDMARK|SITE_UPDATE|EVENT|SYSTEM
    pub title: &'a str,
    pub description: &'a str,
    pub timestamp: i64,
    pub image_url: &'a str,
    pub is_featured: bool,
    pub related_id: &'a str,
}

const SQL_INSERT_NOTIFICATION: &str = r#"
INSERT INTO notifications (
  id,
  user_id,
  kind,
  title,
  description,
  timestamp,
  is_read,
  image_url,
  is_featured,
  related_id,
  opened_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8, ?9, 0)
"#;

const SQL_LIST_FOR_USER: &str = r#"
SELECT
  id, user_id, kind, title, description, timestamp,
  is_read, image_url, is_featured, related_id, opened_at
FROM notifications
WHERE user_id = ?1
ORDER BY timestamp DESC, id ASC
"#;

const SQL_MARK_READ: &str = r#"
UPDATE notifications
SET is_read = 1, opened_at = ?3
WHERE user_id = ?1 AND id = ?2
"#;

const SQL_MARK_ALL_READ: &str = r#"
UPDATE notifications
SET is_read = 1, opened_at = ?2
WHERE user_id = ?1 AND is_read = 0
"#;

const SQL_DELETE_ONE: &str = r#"
DELETE FROM notifications WHERE user_id = ?1 AND id = ?2
"#;

const SQL_DELETE_ALL: &str = r#"
DELETE FROM notifications WHERE user_id = ?1
"#;

pub async fn insert_notification(
    pool: &SqlitePool,
    notification: NewNotification<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_NOTIFICATION)
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(notification.kind)
        .bind(notification.title)
        .bind(notification.description)
        .bind(notification.timestamp)
        .bind(notification.image_url)
        .bind(notification.is_featured as i64)
        .bind(notification.related_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<NotificationRow>> {
    sqlx::query_as::<_, NotificationRow>(SQL_LIST_FOR_USER)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn mark_read(
    pool: &SqlitePool,
    user_id: &str,
    notification_id: &str,
    opened_at: i64,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_MARK_READ)
        .bind(user_id)
        .bind(notification_id)
        .bind(opened_at)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn mark_all_read(pool: &SqlitePool, user_id: &str, opened_at: i64) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_MARK_ALL_READ)
        .bind(user_id)
        .bind(opened_at)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_one(pool: &SqlitePool, user_id: &str, notification_id: &str) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_ONE)
        .bind(user_id)
        .bind(notification_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_all(pool: &SqlitePool, user_id: &str) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_ALL)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
