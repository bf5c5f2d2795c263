use anyhow::Context as _;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::config::PointsConfig;
use crate::domain::repository::NotificationPort;
use crate::domain::types::ExpiryNotice;
use crate::error::PointsServiceError;

/// SMTP mailer for expiry notices. Without a transport every send is a no-op.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &PointsConfig) -> anyhow::Result<Self> {
        let from: Mailbox = config.mail_from.parse().context("parse MAIL_FROM")?;
        let Some(host) = config.smtp_host.as_deref() else {
            return Ok(Self::disabled(from));
        };
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::relay(host).context("build SMTP relay")?;
        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Ok(Self {
            transport: Some(builder.build()),
            from,
        })
    }

    pub fn disabled(from: Mailbox) -> Self {
        Self {
            transport: None,
            from,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    fn build_message(&self, notice: &ExpiryNotice) -> anyhow::Result<Message> {
        let to: Mailbox = notice.email.parse().context("parse recipient address")?;
        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(ExpiryNotice::SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(notice.body())
            .context("build expiry notice")
    }
}

impl NotificationPort for SmtpMailer {
    async fn send_expiry_notice(&self, notice: &ExpiryNotice) -> Result<(), PointsServiceError> {
        let Some(transport) = &self.transport else {
            tracing::debug!(token_code = %notice.token_code, "mail disabled, expiry notice skipped");
            return Ok(());
        };
        let message = self.build_message(notice)?;
        transport
            .send(message)
            .await
            .context("send expiry notice")?;
        tracing::info!(token_code = %notice.token_code, "expiry notice sent");
        Ok(())
    }
}
