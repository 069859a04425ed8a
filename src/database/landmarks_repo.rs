use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{Landmark, LandmarkRow};

pub const SQL_LIST_LANDMARKS: &str = r#"
SELECT
    id, name, name_arabic, category, category_arabic,
    description, description_arabic, long_description, long_description_arabic,
    image_url, city, city_arabic, governorate, governorate_arabic, region,
    latitude, longitude, details, rating, review_count,
    is_featured, is_trending, is_historical, tags, tags_arabic,
    status, status_arabic, visiting_hours, entry_fee, best_time_to_visit,
    created_at, updated_at
FROM landmarks
ORDER BY created_at ASC, rowid ASC
"#;

pub const SQL_FIND_LANDMARK: &str = r#"
SELECT
    id, name, name_arabic, category, category_arabic,
    description, description_arabic, long_description, long_description_arabic,
    image_url, city, city_arabic, governorate, governorate_arabic, region,
    latitude, longitude, details, rating, review_count,
    is_featured, is_trending, is_historical, tags, tags_arabic,
    status, status_arabic, visiting_hours, entry_fee, best_time_to_visit,
    created_at, updated_at
FROM landmarks
WHERE id = ?1
"#;

const SQL_INSERT_LANDMARK: &str = r#"
INSERT INTO landmarks (
    id, name, name_arabic, category, category_arabic,
    description, description_arabic, long_description, long_description_arabic,
    image_url, city, city_arabic, governorate, governorate_arabic, region,
    latitude, longitude, details, rating, review_count,
    is_featured, is_trending, is_historical, tags, tags_arabic,
    status, status_arabic, visiting_hours, entry_fee, best_time_to_visit,
    created_at, updated_at
) VALUES (
    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
    ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20,
    ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30,
    ?31, ?32
)
"#;

const SQL_UPDATE_LANDMARK: &str = r#"
UPDATE landmarks SET
    name = ?2, name_arabic = ?3, category = ?4, category_arabic = ?5,
    description = ?6, description_arabic = ?7,
    long_description = ?8, long_description_arabic = ?9,
    image_url = ?10, city = ?11, city_arabic = ?12,
    governorate = ?13, governorate_arabic = ?14, region = ?15,
    latitude = ?16, longitude = ?17, details = ?18, rating = ?19, review_count = ?20,
    is_featured = ?21, is_trending = ?22, is_historical = ?23,
    tags = ?24, tags_arabic = ?25, status = ?26, status_arabic = ?27,
    visiting_hours = ?28, entry_fee = ?29, best_time_to_visit = ?30,
    updated_at = ?32
WHERE id = ?1
"#;

const SQL_UPDATE_STATUS: &str = r#"
UPDATE landmarks
SET status = ?2, status_arabic = ?3, updated_at = ?4
WHERE id = ?1
"#;

const SQL_DELETE_LANDMARK: &str = r#"
DELETE FROM landmarks WHERE id = ?1
"#;

pub async fn list_landmarks(pool: &SqlitePool) -> sqlx::Result<Vec<Landmark>> {
    let rows = sqlx::query_as::<_, LandmarkRow>(SQL_LIST_LANDMARKS)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Landmark::from).collect())
}

pub async fn find_landmark(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<Landmark>> {
    let row = sqlx::query_as::<_, LandmarkRow>(SQL_FIND_LANDMARK)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Landmark::from))
}

pub async fn insert_landmark(pool: &SqlitePool, landmark: &Landmark) -> sqlx::Result<()> {
    bind_landmark(sqlx::query(SQL_INSERT_LANDMARK), landmark)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_landmark(pool: &SqlitePool, landmark: &Landmark) -> sqlx::Result<u64> {
    let result = bind_landmark(sqlx::query(SQL_UPDATE_LANDMARK), landmark)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    status: &str,
    status_arabic: &str,
    updated_at: i64,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_STATUS)
        .bind(id)
        .bind(status)
        .bind(status_arabic)
        .bind(updated_at)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_landmark(conn: &mut SqliteConnection, id: &str) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_LANDMARK)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>;

fn bind_landmark<'q>(query: SqliteQuery<'q>, l: &'q Landmark) -> SqliteQuery<'q> {
    let details = serde_json::to_string(&l.details).unwrap_or_else(|_| "{}".to_string());
    let tags = serde_json::to_string(&l.tags).unwrap_or_else(|_| "[]".to_string());
    let tags_arabic = serde_json::to_string(&l.tags_arabic).unwrap_or_else(|_| "[]".to_string());

    query
        .bind(&l.id)
        .bind(&l.name)
        .bind(&l.name_arabic)
        .bind(&l.category)
        .bind(&l.category_arabic)
        .bind(&l.description)
        .bind(&l.description_arabic)
        .bind(&l.long_description)
        .bind(&l.long_description_arabic)
        .bind(&l.image_url)
        .bind(&l.location.city)
        .bind(&l.location.city_arabic)
        .bind(&l.location.governorate)
        .bind(&l.location.governorate_arabic)
        .bind(&l.location.region)
        .bind(l.location.latitude)
        .bind(l.location.longitude)
        .bind(details)
        .bind(l.rating)
        .bind(l.review_count)
        .bind(l.is_featured as i64)
        .bind(l.is_trending as i64)
        .bind(l.is_historical as i64)
        .bind(tags)
        .bind(tags_arabic)
        .bind(&l.status)
        .bind(&l.status_arabic)
        .bind(&l.visiting_hours)
        .bind(&l.entry_fee)
        .bind(&l.best_time_to_visit)
        .bind(l.created_at)
        .bind(l.updated_at)
}
