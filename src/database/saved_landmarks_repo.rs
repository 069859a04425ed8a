use sqlx::{SqliteConnection, SqlitePool};

use crate::models::SavedLandmarkRow;

const SQL_INSERT_SAVED: &str = r#"
INSERT INTO saved_landmarks (user_id, landmark_id, saved_at)
VALUES (?1, ?2, ?3)
ON CONFLICT (user_id, landmark_id) DO UPDATE SET saved_at = excluded.saved_at
"#;

const SQL_DELETE_SAVED: &str = r#"
DELETE FROM saved_landmarks
WHERE user_id = ?1 AND landmark_id = ?2
"#;

const SQL_IS_SAVED: &str = r#"
SELECT COUNT(*) FROM saved_landmarks
WHERE user_id = ?1 AND landmark_id = ?2
"#;

const SQL_LIST_SAVED_FOR_USER: &str = r#"
SELECT landmark_id, saved_at
FROM saved_landmarks
WHERE user_id = ?1
ORDER BY saved_at DESC, landmark_id ASC
"#;

const SQL_LIST_SAVERS: &str = r#"
SELECT user_id
FROM saved_landmarks
WHERE landmark_id = ?1
ORDER BY user_id ASC
"#;

const SQL_DELETE_FOR_LANDMARK: &str = r#"
DELETE FROM saved_landmarks WHERE landmark_id = ?1
"#;

pub async fn insert_saved(
    pool: &SqlitePool,
    user_id: &str,
    landmark_id: &str,
    saved_at: i64,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_SAVED)
        .bind(user_id)
        .bind(landmark_id)
        .bind(saved_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_saved(pool: &SqlitePool, user_id: &str, landmark_id: &str) -> sqlx::Result<()> {
    sqlx::query(SQL_DELETE_SAVED)
        .bind(user_id)
        .bind(landmark_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn is_saved(pool: &SqlitePool, user_id: &str, landmark_id: &str) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar(SQL_IS_SAVED)
        .bind(user_id)
        .bind(landmark_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn list_saved_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<SavedLandmarkRow>> {
    sqlx::query_as::<_, SavedLandmarkRow>(SQL_LIST_SAVED_FOR_USER)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn list_savers(pool: &SqlitePool, landmark_id: &str) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar(SQL_LIST_SAVERS)
        .bind(landmark_id)
        .fetch_all(pool)
        .await
}

pub async fn delete_for_landmark(
    conn: &mut SqliteConnection,
    landmark_id: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_FOR_LANDMARK)
        .bind(landmark_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
