use sqlx::SqlitePool;

use crate::models::{PendingVerificationRow, UsersRow};

pub struct NewUser<'a> {
    pub user_id: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub city: Option<&'a str>,
    pub created_at: i64,
}

pub const SQL_FIND_USER: &str = r#"
SELECT user_id, full_name, email, phone, city, role, is_verified, created_at
FROM users
WHERE user_id = ?1
"#;

const SQL_FIND_USER_ID_BY_EMAIL: &str = r#"
SELECT user_id FROM users WHERE LOWER(email) = LOWER(?1) LIMIT 1
"#;

const SQL_INSERT_VERIFIED_USER: &str = r#"
INSERT INTO users (user_id, full_name, email, phone, city, role, is_verified, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, 'user', 1, ?6)
"#;

const SQL_UPDATE_PROFILE: &str = r#"
UPDATE users
SET full_name = ?2, email = ?3, phone = ?4, city = ?5
WHERE user_id = ?1
"#;

const SQL_LIST_USER_IDS: &str = r#"
SELECT user_id FROM users ORDER BY user_id ASC
"#;

const SQL_UPSERT_PENDING: &str = r#"
INSERT INTO pending_verifications (email, full_name, phone, city, code, issued_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT (email) DO UPDATE SET
  full_name = excluded.full_name,
  phone = excluded.phone,
  city = excluded.city,
  code = excluded.code,
  issued_at = excluded.issued_at
"#;

const SQL_FIND_PENDING: &str = r#"
SELECT email, full_name, phone, city, code, issued_at
FROM pending_verifications
WHERE email = ?1
"#;

const SQL_DELETE_PENDING: &str = r#"
DELETE FROM pending_verifications WHERE email = ?1
"#;

pub async fn find_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Option<UsersRow>> {
    sqlx::query_as::<_, UsersRow>(SQL_FIND_USER)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_id_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar(SQL_FIND_USER_ID_BY_EMAIL)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn insert_verified_user(pool: &SqlitePool, user: NewUser<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_VERIFIED_USER)
        .bind(user.user_id)
        .bind(user.full_name)
        .bind(user.email)
        .bind(user.phone)
        .bind(user.city)
        .bind(user.created_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_profile(
    pool: &SqlitePool,
    user_id: &str,
    full_name: &str,
    email: &str,
    phone: &str,
    city: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_PROFILE)
        .bind(user_id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(city)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn list_user_ids(pool: &SqlitePool) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar(SQL_LIST_USER_IDS).fetch_all(pool).await
}

pub async fn upsert_pending(pool: &SqlitePool, pending: &PendingVerificationRow) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_PENDING)
        .bind(&pending.email)
        .bind(&pending.full_name)
        .bind(&pending.phone)
        .bind(&pending.city)
        .bind(&pending.code)
        .bind(pending.issued_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn find_pending(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Option<PendingVerificationRow>> {
    sqlx::query_as::<_, PendingVerificationRow>(SQL_FIND_PENDING)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn delete_pending(pool: &SqlitePool, email: &str) -> sqlx::Result<()> {
    sqlx::query(SQL_DELETE_PENDING)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(())
}
