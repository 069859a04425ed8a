use sqlx::SqlitePool;

const SQL_SCHEMA: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS landmarks (
  id TEXT PRIMARY KEY,
  name TEXT,
  name_arabic TEXT,
  category TEXT,
  category_arabic TEXT,
  description TEXT,
  description_arabic TEXT,
  long_description TEXT,
  long_description_arabic TEXT,
  image_url TEXT,
  city TEXT,
  city_arabic TEXT,
  governorate TEXT,
  governorate_arabic TEXT,
  region TEXT,
  latitude REAL,
  longitude REAL,
  details TEXT,
  rating REAL,
  review_count INTEGER,
  is_featured INTEGER NOT NULL DEFAULT 0,
  is_trending INTEGER NOT NULL DEFAULT 0,
  is_historical INTEGER NOT NULL DEFAULT 0,
  tags TEXT,
  tags_arabic TEXT,
  status TEXT,
  status_arabic TEXT,
  visiting_hours TEXT,
  entry_fee TEXT,
  best_time_to_visit TEXT,
  created_at INTEGER,
  updated_at INTEGER
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS saved_landmarks (
  user_id TEXT NOT NULL,
  landmark_id TEXT NOT NULL,
  saved_at INTEGER NOT NULL,
  PRIMARY KEY (user_id, landmark_id)
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS notifications (
  id TEXT PRIMARY KEY,
  user_id TEXT NOT NULL,
  kind TEXT,
  title TEXT,
  description TEXT,
  timestamp INTEGER,
  is_read INTEGER NOT NULL DEFAULT 0,
  image_url TEXT,
  is_featured INTEGER NOT NULL DEFAULT 0,
  related_id TEXT,
  opened_at INTEGER NOT NULL DEFAULT 0
)
"#,
    r#"
CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications (user_id, timestamp)
"#,
    r#"
CREATE TABLE IF NOT EXISTS users (
  user_id TEXT PRIMARY KEY,
  full_name TEXT,
  email TEXT,
  phone TEXT,
  city TEXT,
  role TEXT NOT NULL DEFAULT 'user',
  is_verified INTEGER NOT NULL DEFAULT 0,
  created_at INTEGER
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS pending_verifications (
  email TEXT PRIMARY KEY,
  full_name TEXT NOT NULL,
  phone TEXT NOT NULL,
  city TEXT,
  code TEXT NOT NULL,
  issued_at INTEGER NOT NULL
)
"#,
];

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    for statement in SQL_SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
