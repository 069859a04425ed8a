use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::MailConfig;
use crate::error::{AppError, AppResult};

pub const VERIFICATION_SUBJECT: &str = "Your Verification Code - East Syria Explorer";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMail {
    pub to: String,
    pub to_name: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()>;
}

pub struct HttpMailRelay {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    sender_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayRequest<'a> {
    #[serde(flatten)]
    mail: &'a OutgoingMail,
    from_name: &'a str,
}

impl HttpMailRelay {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.relay_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            sender_name: config.sender_name.clone(),
        }
    }
}

#[async_trait]
impl MailRelay for HttpMailRelay {
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        let mut req = self.client.post(&self.url).json(&RelayRequest {
            mail,
            from_name: &self.sender_name,
        });
        if let Some(key) = &self.api_key {
            req = req.header("x-api-key", key);
        }

        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("✉️ Mail relay unreachable: {}", e);
                return Err(AppError::Mail(e.to_string()));
            }
        };

        if !resp.status().is_success() {
            warn!("✉️ Mail relay non-OK: {}", resp.status());
            return Err(AppError::Mail(format!("relay answered {}", resp.status())));
        }

        info!("✉️ Mail sent to {}", mail.to);
        Ok(())
    }
}

pub fn verification_mail(to: &str, to_name: &str, code: &str) -> OutgoingMail {
    OutgoingMail {
        to: to.to_string(),
        to_name: to_name.to_string(),
        subject: VERIFICATION_SUBJECT.to_string(),
        html: verification_body(to_name, code),
    }
}

fn verification_body(name: &str, code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"></head>
<body style="margin:0;padding:20px;font-family:Arial,sans-serif;background:#f5f5f5;">
  <div style="max-width:600px;margin:0 auto;background:#ffffff;border-radius:12px;overflow:hidden;">
    <div style="background:#FF6B35;padding:32px;text-align:center;">
      <h1 style="color:#ffffff;margin:0;">East Syria Explorer</h1>
    </div>
    <div style="padding:32px;">
      <h2 style="color:#333333;margin-top:0;">Hello {name}!</h2>
      <p style="color:#666666;">Thanks for signing up. Enter this code in the app to verify your email:</p>
      <p style="font-size:40px;font-weight:bold;color:#FF6B35;letter-spacing:8px;text-align:center;">{code}</p>
      <p style="color:#999999;text-align:center;">This code expires in 10 minutes</p>
      <p style="color:#999999;font-size:13px;">If you didn't request this, you can ignore this email.</p>
    </div>
  </div>
</body>
</html>"#,
        name = escape_html(name),
        code = escape_html(code),
    )
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
