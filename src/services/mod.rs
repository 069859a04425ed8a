pub mod admin_service;
pub mod browse_service;
pub mod category_service;
pub mod detail_service;
pub mod filter_service;
pub mod home_service;
pub mod import_service;
pub mod mail_service;
pub mod map_service;
pub mod notification_service;
pub mod profile_service;
pub mod saved_service;
pub mod screen_service;
pub mod search_service;
pub mod signup_service;

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
