use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use super::OutreachError;
use crate::config::SmtpConfig;

/// Sends plain-text emails through an authenticated STARTTLS relay.
#[derive(Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.username.is_some() && self.config.password.is_some()
    }

    /// Sends one message per recipient over a single connection.
    /// Returns how many messages were sent; stops at the first failure.
    pub async fn send_all(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<usize, OutreachError> {
        let (username, password) = match (&self.config.username, &self.config.password) {
            (Some(u), Some(p)) => (u.clone(), p.clone()),
            _ => return Err(OutreachError::NotConfigured),
        };
        if recipients.is_empty() {
            return Err(OutreachError::NoRecipients);
        }

        let from = parse_mailbox(&username)?;
        let messages = recipients
            .iter()
            .map(|to| build_message(&from, parse_mailbox(to)?, subject, body))
            .collect::<Result<Vec<_>, _>>()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(username, password))
            .build();

        for message in messages {
            transport.send(message).await?;
        }

        info!(
            "Sent {} email(s) via {}:{}",
            recipients.len(),
            self.config.host,
            self.config.port
        );
        Ok(recipients.len())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, OutreachError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| OutreachError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

fn build_message(
    from: &Mailbox,
    to: Mailbox,
    subject: &str,
    body: &str,
) -> Result<Message, OutreachError> {
    Ok(Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(username: Option<&str>, password: Option<&str>) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: username.map(String::from),
            password: password.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_mailer_refuses_to_send() {
        let mailer = SmtpMailer::new(config(Some("me@example.com"), None));
        assert!(!mailer.is_configured());
        let err = mailer
            .send_all(&["hr@acme.io".to_string()], "s", "b")
            .await
            .unwrap_err();
        assert!(matches!(err, OutreachError::NotConfigured));
    }

    #[tokio::test]
    async fn test_no_recipients_is_rejected() {
        let mailer = SmtpMailer::new(config(Some("me@example.com"), Some("pw")));
        let err = mailer.send_all(&[], "s", "b").await.unwrap_err();
        assert!(matches!(err, OutreachError::NoRecipients));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_rejected_before_connecting() {
        let mailer = SmtpMailer::new(config(Some("me@example.com"), Some("pw")));
        let err = mailer
            .send_all(&["not-an-address".to_string()], "s", "b")
            .await
            .unwrap_err();
        match err {
            OutreachError::InvalidAddress { address, .. } => assert_eq!(address, "not-an-address"),
            other => panic!("expected InvalidAddress, got {other:?}"),
        }
    }

    #[test]
    fn test_build_message_sets_headers() {
        let from = parse_mailbox("me@example.com").unwrap();
        let to = parse_mailbox("hr@acme.io").unwrap();
        let message = build_message(&from, to, "Application", "Hello").unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Application"));
        assert!(raw.contains("To: hr@acme.io"));
        assert!(raw.contains("Content-Type: text/plain"));
    }
}
