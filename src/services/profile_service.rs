use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::database::UserStore;
use crate::error::{AppError, AppResult};
use crate::models::UserProfile;
use crate::services::signup_service::normalize_email;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePage {
    pub profile: UserProfile,
    pub location_label: String,
    pub member_since: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
}

pub fn member_since(created_at_ms: i64) -> String {
    if created_at_ms <= 0 {
        return String::new();
    }
    DateTime::from_timestamp_millis(created_at_ms)
        .map(|at| format!("Member since {}", at.format("%B %Y")))
        .unwrap_or_default()
}

pub async fn load_profile_page(users: &dyn UserStore, user_id: &str) -> AppResult<ProfilePage> {
    let profile = users
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;

    Ok(ProfilePage {
        location_label: format!("Explorer from {}", profile.city),
        member_since: member_since(profile.created_at),
        profile,
    })
}

pub async fn save_profile(
    users: &dyn UserStore,
    user_id: &str,
    update: &ProfileUpdate,
) -> AppResult<UserProfile> {
    let full_name = update.full_name.trim();
    let email = normalize_email(&update.email);
    let phone = update.phone.trim();
    let city = update.city.trim();

    if full_name.is_empty() {
        return Err(AppError::validation("fullName", "Required"));
    }
    if email.is_empty() {
        return Err(AppError::validation("email", "Required"));
    }
    if phone.is_empty() {
        return Err(AppError::validation("phone", "Required"));
    }
    if let Some(owner) = users.find_user_id_by_email(&email).await? {
        if owner != user_id {
            return Err(AppError::validation(
                "email",
                "An account with this email already exists",
            ));
        }
    }

    if !users
        .update_profile(user_id, full_name, &email, phone, city)
        .await?
    {
        return Err(AppError::NotFound(format!("user {}", user_id)));
    }

    users
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{NewUser, SqliteStore};

    // 2025-10-09T08:53:20Z
    const CREATED: i64 = 1_760_000_000_000;

    async fn store_with_user() -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .insert_verified_user(NewUser {
                user_id: "u1",
                full_name: "Omar Khalil",
                email: "omar@example.com",
                phone: "0944555666",
                city: Some("Raqqa"),
                created_at: CREATED,
            })
            .await
            .unwrap();
        store
    }

    #[test]
    fn member_since_label() {
        assert_eq!(member_since(CREATED), "Member since October 2025");
        assert_eq!(member_since(0), "");
    }

    #[tokio::test]
    async fn profile_page_labels() {
        let store = store_with_user().await;
        let page = load_profile_page(&store, "u1").await.unwrap();
        assert_eq!(page.location_label, "Explorer from Raqqa");
        assert_eq!(page.profile.full_name, "Omar Khalil");

        let err = load_profile_page(&store, "missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn save_requires_name_email_phone_but_not_city() {
        let store = store_with_user().await;
        let err = save_profile(
            &store,
            "u1",
            &ProfileUpdate {
                full_name: "Omar".into(),
                email: " ".into(),
                phone: "0944".into(),
                city: String::new(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "email", .. }));
        // Nothing was written.
        assert_eq!(store.find_user("u1").await.unwrap().unwrap().full_name, "Omar Khalil");

        let saved = save_profile(
            &store,
            "u1",
            &ProfileUpdate {
                full_name: " Omar K. ".into(),
                email: "omar.k@example.com".into(),
                phone: "0944000111".into(),
                city: String::new(),
            },
        )
        .await
        .unwrap();
        assert_eq!(saved.full_name, "Omar K.");
        assert_eq!(saved.city, "");
        assert_eq!(saved.email, "omar.k@example.com");
    }

    #[tokio::test]
    async fn email_is_lowercased_and_must_stay_unique() {
        let store = store_with_user().await;
        store
            .insert_verified_user(NewUser {
                user_id: "u2",
                full_name: "Layla Saleh",
                email: "layla@example.com",
                phone: "0933222111",
                city: None,
                created_at: CREATED,
            })
            .await
            .unwrap();

        let err = save_profile(
            &store,
            "u1",
            &ProfileUpdate {
                full_name: "Omar Khalil".into(),
                email: " Layla@Example.COM ".into(),
                phone: "0944555666".into(),
                city: "Raqqa".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "email", .. }));
        assert_eq!(store.find_user("u1").await.unwrap().unwrap().email, "omar@example.com");

        // Re-saving your own address in another case is fine.
        let saved = save_profile(
            &store,
            "u1",
            &ProfileUpdate {
                full_name: "Omar Khalil".into(),
                email: "Omar@Example.com".into(),
                phone: "0944555666".into(),
                city: "Raqqa".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(saved.email, "omar@example.com");
    }
}
