#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedLandmarkRow {
    pub landmark_id: String,
    pub saved_at: i64,
}
