use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::{NewNotification, NotificationStore};
use crate::error::{AppError, AppResult};
use crate::models::{Notification, NotificationKind};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    #[serde(flatten)]
    pub notification: Notification,
    pub time_ago: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSection {
    pub header: &'static str,
    pub items: Vec<NotificationView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsPage {
    pub sections: Vec<NotificationSection>,
    pub unread_count: usize,
    pub is_empty: bool,
}

pub fn relative_time(now_ms: i64, timestamp: i64) -> String {
    let seconds = (now_ms - timestamp).max(0) / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        format!("{}s ago", seconds)
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days == 1 {
        "Yesterday".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else {
        format!("{} weeks ago", days / 7)
    }
}

/// Newest first, split at exactly 24h before `now_ms`: strictly newer is
/// "RECENT", the boundary itself and older is "EARLIER". Empty sections are
/// left out.
pub fn bucket(mut notifications: Vec<Notification>, now_ms: i64) -> Vec<NotificationSection> {
    notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let one_day_ago = now_ms - DAY_MS;

    let (recent, earlier): (Vec<_>, Vec<_>) = notifications
        .into_iter()
        .map(|n| NotificationView {
            time_ago: relative_time(now_ms, n.timestamp),
            notification: n,
        })
        .partition(|v| v.notification.timestamp > one_day_ago);

    let mut sections = Vec::new();
    if !recent.is_empty() {
        sections.push(NotificationSection {
            header: "RECENT",
            items: recent,
        });
    }
    if !earlier.is_empty() {
        sections.push(NotificationSection {
            header: "EARLIER",
            items: earlier,
        });
    }
    sections
}

pub async fn build_notifications_page(
    store: &dyn NotificationStore,
    user_id: &str,
    now_ms: i64,
) -> AppResult<NotificationsPage> {
    let notifications = store.list_notifications(user_id).await?;
    let unread_count = notifications.iter().filter(|n| !n.is_read).count();
    let sections = bucket(notifications, now_ms);
    Ok(NotificationsPage {
        is_empty: sections.is_empty(),
        sections,
        unread_count,
    })
}

pub async fn unread_count(store: &dyn NotificationStore, user_id: &str) -> AppResult<usize> {
    let notifications = store.list_notifications(user_id).await?;
    Ok(notifications.iter().filter(|n| !n.is_read).count())
}

pub async fn mark_read(
    store: &dyn NotificationStore,
    user_id: &str,
    notification_id: &str,
    now_ms: i64,
) -> AppResult<()> {
    if !store.mark_read(user_id, notification_id, now_ms).await? {
        return Err(AppError::NotFound(format!("notification {}", notification_id)));
    }
    Ok(())
}

pub async fn mark_all_read(
    store: &dyn NotificationStore,
    user_id: &str,
    now_ms: i64,
) -> AppResult<u64> {
    store.mark_all_read(user_id, now_ms).await
}

pub async fn delete_notification(
    store: &dyn NotificationStore,
    user_id: &str,
    notification_id: &str,
) -> AppResult<()> {
    if !store.delete_notification(user_id, notification_id).await? {
        return Err(AppError::NotFound(format!("notification {}", notification_id)));
    }
    Ok(())
}

pub async fn delete_all(store: &dyn NotificationStore, user_id: &str) -> AppResult<u64> {
    store.delete_all_notifications(user_id).await
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub is_featured: bool,
    pub related_id: String,
}

impl NotificationDraft {
    pub fn new_landmark(landmark_id: &str, landmark_name: &str, image_url: &str) -> Self {
        Self {
            kind: NotificationKind::Landmark,
            title: format!("New Landmark: {}", landmark_name),
            description: "Check out this amazing landmark!".to_string(),
            image_url: image_url.to_string(),
            is_featured: false,
            related_id: landmark_id.to_string(),
        }
    }

    pub fn site_update(
        landmark_id: &str,
        landmark_name: &str,
        update: &str,
        image_url: &str,
    ) -> Self {
        Self {
            kind: NotificationKind::SiteUpdate,
            title: format!("Update: {}", landmark_name),
            description: update.to_string(),
            image_url: image_url.to_string(),
            is_featured: false,
            related_id: landmark_id.to_string(),
        }
    }

    pub fn event(title: &str, description: &str) -> Self {
        Self::plain(NotificationKind::Event, title, description)
    }

    pub fn system(title: &str, message: &str) -> Self {
        Self::plain(NotificationKind::System, title, message)
    }

    fn plain(kind: NotificationKind, title: &str, description: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            image_url: String::new(),
            is_featured: false,
            related_id: String::new(),
        }
    }
}

pub async fn send_to(
    store: &dyn NotificationStore,
    recipients: &[String],
    draft: &NotificationDraft,
    now_ms: i64,
) -> usize {
    let mut sent = 0;
    for user_id in recipients {
        let id = Uuid::new_v4().to_string();
        let result = store
            .insert_notification(NewNotification {
                id: &id,
                user_id,
                kind: draft.kind.as_str(),
                title: &draft.title,
                description: &draft.description,
                timestamp: now_ms,
                image_url: &draft.image_url,
                is_featured: draft.is_featured,
                related_id: &draft.related_id,
            })
            .await;
        match result {
            Ok(()) => sent += 1,
            Err(e) => warn!("🔔 Notification to {} failed: {}", user_id, e),
        }
    }
    info!(
        "🔔 Sent {} {} notification(s) of {}",
        sent,
        draft.kind.as_str(),
        recipients.len()
    );
    sent
}
