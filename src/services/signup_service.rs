use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::{NewUser, UserStore};
use crate::error::{AppError, AppResult};
use crate::models::{PendingVerificationRow, UserProfile};
use crate::services::mail_service::{self, MailRelay};

pub const CODE_TTL_MS: i64 = 600_000;
pub const RESEND_COOLDOWN_MS: i64 = 60_000;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignupStarted {
    pub email: String,
    pub expires_at: i64,
    pub resend_available_at: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
    #[serde(default)]
    pub uid: Option<String>,
}

pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(100_000..=999_999).to_string()
}

// Still valid at exactly `issued_at + CODE_TTL_MS`.
pub fn is_expired(issued_at: i64, now_ms: i64) -> bool {
    now_ms > issued_at + CODE_TTL_MS
}

pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn validate_form(form: &SignupForm) -> AppResult<()> {
    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::validation("fullName", "Full name is required"));
    }
    if full_name.chars().count() < 3 {
        return Err(AppError::validation("fullName", "Name must be at least 3 characters"));
    }

    let email = form.email.trim();
    if email.is_empty() {
        return Err(AppError::validation("email", "Email is required"));
    }
    if !is_valid_email(email) {
        return Err(AppError::validation("email", "Please enter a valid email"));
    }

    let phone = form.phone.trim();
    if phone.is_empty() {
        return Err(AppError::validation("phone", "Phone number is required"));
    }
    if phone.chars().count() < 10 {
        return Err(AppError::validation("phone", "Please enter a valid phone number"));
    }

    if form.city.trim().is_empty() {
        return Err(AppError::validation("city", "Please select a city"));
    }
    Ok(())
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn send_code(mail: &dyn MailRelay, pending: &PendingVerificationRow) -> AppResult<()> {
    let message = mail_service::verification_mail(&pending.email, &pending.full_name, &pending.code);
    mail.send(&message).await
}

pub async fn start_signup(
    users: &dyn UserStore,
    mail: &dyn MailRelay,
    form: &SignupForm,
    now_ms: i64,
) -> AppResult<SignupStarted> {
    validate_form(form)?;
    let email = normalize_email(&form.email);
    if users.find_user_id_by_email(&email).await?.is_some() {
        return Err(AppError::validation(
            "email",
            "An account with this email already exists",
        ));
    }

    let pending = PendingVerificationRow {
        email: email.clone(),
        full_name: form.full_name.trim().to_string(),
        phone: form.phone.trim().to_string(),
        city: Some(form.city.trim().to_string()),
        code: generate_code(&mut rand::thread_rng()),
        issued_at: now_ms,
    };
    users.upsert_pending(&pending).await?;

    if let Err(e) = send_code(mail, &pending).await {
        warn!("📧 Verification mail to {} failed: {}", email, e);
        users.delete_pending(&email).await?;
        return Err(e);
    }

    info!("📧 Verification code sent to {}", email);
    Ok(SignupStarted {
        email,
        expires_at: now_ms + CODE_TTL_MS,
        resend_available_at: now_ms + RESEND_COOLDOWN_MS,
    })
}

pub async fn resend_code(
    users: &dyn UserStore,
    mail: &dyn MailRelay,
    email: &str,
    now_ms: i64,
) -> AppResult<SignupStarted> {
    let email = normalize_email(email);
    let Some(mut pending) = users.find_pending(&email).await? else {
        return Err(AppError::NotFound(format!("pending sign-up for {}", email)));
    };

    let available_at = pending.issued_at + RESEND_COOLDOWN_MS;
    if now_ms < available_at {
        let wait_s = (available_at - now_ms + 999) / 1000;
        return Err(AppError::validation("code", format!("Resend in {}s", wait_s)));
    }

    pending.code = generate_code(&mut rand::thread_rng());
    pending.issued_at = now_ms;
    send_code(mail, &pending).await?;
    users.upsert_pending(&pending).await?;

    info!("📧 Verification code re-sent to {}", email);
    Ok(SignupStarted {
        email,
        expires_at: now_ms + CODE_TTL_MS,
        resend_available_at: now_ms + RESEND_COOLDOWN_MS,
    })
}

pub async fn verify_code(
    users: &dyn UserStore,
    request: &VerifyRequest,
    now_ms: i64,
) -> AppResult<UserProfile> {
    let code = request.code.trim();
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation("code", "Please enter the 6-digit code"));
    }

    let email = normalize_email(&request.email);
    let Some(pending) = users.find_pending(&email).await? else {
        return Err(AppError::NotFound(format!("pending sign-up for {}", email)));
    };

    if is_expired(pending.issued_at, now_ms) {
        return Err(AppError::validation(
            "code",
            "Verification code has expired. Please request a new one.",
        ));
    }
    if code != pending.code {
        return Err(AppError::validation(
            "code",
            "Invalid verification code. Please try again.",
        ));
    }

    let user_id = request
        .uid
        .clone()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    users
        .insert_verified_user(NewUser {
            user_id: &user_id,
            full_name: &pending.full_name,
            email: &pending.email,
            phone: &pending.phone,
            city: pending.city.as_deref(),
            created_at: now_ms,
        })
        .await?;
    users.delete_pending(&email).await?;
    info!("✅ Account created for {}", email);

    users
        .find_user(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
}
