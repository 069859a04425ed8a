use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UsersRow {
    pub user_id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub role: Option<String>,
    pub is_verified: Option<i64>,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub role: String,
    pub is_verified: bool,
    pub created_at: i64,
}

impl From<UsersRow> for UserProfile {
    fn from(row: UsersRow) -> Self {
        UserProfile {
            uid: row.user_id,
            full_name: row.full_name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            role: row.role.unwrap_or_else(|| "user".to_string()),
            is_verified: row.is_verified.unwrap_or(0) == 1,
            created_at: row.created_at.unwrap_or(0),
        }
    }
}

// Sign-up waiting for its emailed code.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PendingVerificationRow {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub city: Option<String>,
    pub code: String,
    pub issued_at: i64,
}
