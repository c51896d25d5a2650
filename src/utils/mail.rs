use crate::config::MailConfig;
use crate::types::mail::SendEmail;
use reqwest::{Client, ClientBuilder};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub async fn send_email(mail: &MailConfig, email: SendEmail) -> Result<String, String> {
    let client: Client = ClientBuilder::new()
        .user_agent("account-auth/0.1 (+reqwest)")
        .tcp_nodelay(true)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| format!("build client failed: {e}"))?;

    info!("[mail] -> POST {} to {:?}", mail.endpoint, email.to);

    let t0 = Instant::now();
    let res = client
        .post(&mail.endpoint)
        .bearer_auth(&mail.api_key) // do NOT log the key
        .json(&email)
        .send()
        .await
        .map_err(|e| format!("send failed: {e}"))?;
    let dt = t0.elapsed();

    let status = res.status();
    let body = res.text().await.map_err(|e| format!("read body failed: {e}"))?;

    info!("[mail] <- status: {status} in {} ms", dt.as_millis());

    if status.is_success() {
        Ok(body)
    } else {
        Err(format!("mail API error: HTTP {status}: {body}"))
    }
}

pub fn render_link(template: &str, token: &str) -> String {
    template.replace("{token}", token)
}

pub async fn mail_activation(mail: &MailConfig, to: &str, token: &str) -> Result<String, String> {
    let link = render_link(&mail.activation_url, token);
    send_email(
        mail,
        SendEmail::text(
            &mail.from,
            to,
            "Confirm your account",
            format!("Welcome! Please confirm your email address by following this link:\n\n{link}\n"),
        ),
    )
    .await
}

pub async fn mail_reset_password(mail: &MailConfig, to: &str, token: &str) -> Result<String, String> {
    let link = render_link(&mail.reset_password_url, token);
    send_email(
        mail,
        SendEmail::text(
            &mail.from,
            to,
            "Reset your password",
            format!(
                "A password reset was requested for this account. If this wasn't you, you can ignore this email.\n\nChoose a new password here:\n\n{link}\n"
            ),
        ),
    )
    .await
}

/// Mail failures never fail the request that triggered them.
pub fn log_mail_result(kind: &str, result: Result<String, String>) {
    if let Err(e) = result {
        warn!("[mail] {kind} mail not delivered: {e}");
    }
}
