// Transactional email delivery over SMTP

use lettre::{
    message::Mailbox,
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::info;

/// Errors that can occur when sending email
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Mailer configuration error: {0}")]
    Config(String),
}

/// Email service for verification and password reset messages
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: Mailbox,
    base_url: String,
}

impl EmailService {
    /// Build the service from SMTP_* / MAIL_FROM / APP_BASE_URL environment variables
    pub fn from_env() -> Result<Self, MailerError> {
        let host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| MailerError::Config("SMTP_PORT must be a number".to_string()))?;
        let username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let password = std::env::var("SMTP_PASSWORD").unwrap_or_default();
        let from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "no-reply@storefront.local".to_string());
        let base_url =
            std::env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let from_address = from
            .parse::<Mailbox>()
            .map_err(|_| MailerError::InvalidAddress(from.clone()))?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)?
            .port(port)
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self {
            mailer,
            from_address,
            base_url,
        })
    }

    /// Send the account verification link after registration
    pub async fn send_verification_email(
        &self,
        to: &str,
        full_name: &str,
        token: &str,
    ) -> Result<(), MailerError> {
        let link = format!("{}/api/v1/verify/user/{}", self.base_url, token);
        let body = format!(
            "Hello {full_name},\n\n\
             Welcome! Please verify your account by visiting the link below:\n\n\
             {link}\n\n\
             If you did not create this account, ignore this message.\n"
        );

        self.send(to, "Verify your account", body).await
    }

    /// Send the password reset link; the token expires after 30 minutes
    pub async fn send_password_reset_email(
        &self,
        to: &str,
        full_name: &str,
        token: &str,
    ) -> Result<(), MailerError> {
        let link = format!("{}/api/v1/reset_password/user/{}", self.base_url, token);
        let body = format!(
            "Hello {full_name},\n\n\
             A password reset was requested for your account. The link below is valid \
             for 30 minutes:\n\n\
             {link}\n\n\
             If you did not request a reset, ignore this message.\n"
        );

        self.send(to, "Reset your password", body).await
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), MailerError> {
        let to_address = to
            .parse::<Mailbox>()
            .map_err(|_| MailerError::InvalidAddress(to.to_string()))?;

        let message = Message::builder()
            .from(self.from_address.clone())
            .to(to_address)
            .subject(subject)
            .body(body)?;

        self.mailer.send(message).await?;
        info!("Sent '{}' email to {}", subject, to);
        Ok(())
    }
}
