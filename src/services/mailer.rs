//! Envío de emails
//!
//! `Mailer` es la costura entre el dispatcher / reportes y el transporte real.
//! En producción se usa SMTP vía `lettre`; sin SMTP configurado los emails
//! solo se registran en el log.

use async_trait::async_trait;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;

/// Errores de envío de email
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP delivery failed: {0}")]
    Smtp(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Email listo para enviar
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    /// Nombre del transporte para los logs
    fn name(&self) -> &str;
}

/// Mailer SMTP (STARTTLS, o TLS implícito en el puerto 465)
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let from = parse_mailbox(&config.from)?;

        let mut builder = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError::Config(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailError::Config(e.to_string()))?
        }
        .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(&email.subject)
            .body(email.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        tracing::info!(to = %email.to, subject = %email.subject, "📧 Email enviado");
        Ok(())
    }

    fn name(&self) -> &str {
        "smtp"
    }
}

/// Mailer de desarrollo: no envía nada, solo deja constancia en el log
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        parse_mailbox(&email.to)?;
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "📭 SMTP no configurado, email registrado sin enviar"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;
    use tokio::sync::Mutex;

    /// Mailer que guarda los emails y puede fallar para ciertos destinatarios
    #[derive(Default)]
    pub(crate) struct RecordingMailer {
        pub sent: Mutex<Vec<OutgoingEmail>>,
        pub failing: HashSet<String>,
    }

    impl RecordingMailer {
        pub(crate) fn failing_for(addresses: &[&str]) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                failing: addresses.iter().map(|a| a.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
            if self.failing.contains(&email.to) {
                return Err(MailError::Smtp("connection refused".into()));
            }
            self.sent.lock().await.push(email.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn log_mailer_rejects_invalid_address() {
        let email = OutgoingEmail {
            to: "not-an-email".into(),
            subject: "s".into(),
            body: "b".into(),
        };
        assert!(matches!(
            LogMailer.send(&email).await,
            Err(MailError::Address { .. })
        ));
    }

    #[tokio::test]
    async fn log_mailer_accepts_valid_address() {
        let email = OutgoingEmail {
            to: "fleet@example.com".into(),
            subject: "s".into(),
            body: "b".into(),
        };
        assert!(LogMailer.send(&email).await.is_ok());
    }

    #[test]
    fn smtp_mailer_from_config() {
        let config = SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: Some("user".into()),
            password: Some("pass".into()),
            from: "Fleet <noreply@example.com>".into(),
        };
        assert!(SmtpMailer::from_config(&config).is_ok());
    }

    #[test]
    fn smtp_mailer_rejects_bad_from() {
        let config = SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: None,
            password: None,
            from: "bad-address".into(),
        };
        assert!(matches!(
            SmtpMailer::from_config(&config),
            Err(MailError::Address { .. })
        ));
    }
}
