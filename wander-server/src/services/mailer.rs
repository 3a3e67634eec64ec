//! Mail dispatch service
//!
//! The auth flow delivers confirmation codes through the [`Mailer`] trait;
//! the trait is the whole surface the rest of the server sees. Two
//! implementations:
//!
//! - [`SmtpMailer`]: real delivery over SMTP (lettre)
//! - [`LogMailer`]: writes the mail to the log instead of sending it,
//!   used in development and tests when no SMTP credentials are configured

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::Mailbox};
use thiserror::Error;

use crate::core::config::MailConfig;

/// Mail dispatch error
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(String),

    #[error("invalid message: {0}")]
    Message(String),

    #[error("mail transport error: {0}")]
    Transport(String),
}

/// Narrow mail-dispatch interface consumed by the auth handlers
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// SMTP mailer backed by lettre
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport from configuration
    ///
    /// Credentials come from the environment (`SMTP_*`), never from source.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)
            .map_err(|e| MailError::Transport(format!("SMTP relay error: {}", e)))?
            .port(config.port)
            .credentials(credentials)
            .build();

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| MailError::Address(format!("Invalid sender '{}': {}", config.from, e)))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| MailError::Address(format!("Invalid recipient '{}': {}", to, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::Message(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}

/// Log-only mailer for development and tests
///
/// Does not deliver anything; the full message lands in the log so the
/// confirmation code is still reachable during local runs.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(
            target: "mail",
            to = %to,
            subject = %subject,
            body = %body,
            "Mail dispatch (log only)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mailer = LogMailer;
        let result = mailer
            .send("ann@example.com", "Confirmation code", "Your code: 123456")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn mailer_is_object_safe() {
        let mailer: std::sync::Arc<dyn Mailer> = std::sync::Arc::new(LogMailer);
        assert!(mailer.send("a@b.com", "s", "b").await.is_ok());
    }
}
