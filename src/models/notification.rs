use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Landmark,
    SiteUpdate,
    Event,
    System,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Landmark => "LANDMARK",
            NotificationKind::SiteUpdate => "SITE_UPDATE",
            NotificationKind::Event => "EVENT",
            NotificationKind::System => "SYSTEM",
        }
    }

    // Unknown stored values fall back to `System`.
    pub fn parse(raw: &str) -> NotificationKind {
        match raw.trim() {
            "LANDMARK" => NotificationKind::Landmark,
            "SITE_UPDATE" => NotificationKind::SiteUpdate,
            "EVENT" => NotificationKind::Event,
            _ => NotificationKind::System,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub timestamp: i64,
    pub is_read: bool,
    pub image_url: String,
    pub is_featured: bool,
    pub related_id: String,
    pub opened_at: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NotificationRow {
    pub id: String,
    pub user_id: String,
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<i64>,
    pub is_read: Option<i64>,
    pub image_url: Option<String>,
    pub is_featured: Option<i64>,
    pub related_id: Option<String>,
    pub opened_at: Option<i64>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: row.id,
            kind: NotificationKind::parse(row.kind.as_deref().unwrap_or("")),
            title: row.title.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            timestamp: row.timestamp.unwrap_or(0),
            is_read: row.is_read.unwrap_or(0) == 1,
            image_url: row.image_url.unwrap_or_default(),
            is_featured: row.is_featured.unwrap_or(0) == 1,
            related_id: row.related_id.unwrap_or_default(),
            opened_at: row.opened_at.unwrap_or(0),
        }
    }
}
