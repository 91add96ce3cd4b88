//! Mailer that only logs, for development without an SMTP relay.

use async_trait::async_trait;
use tracing::{debug, info};

use super::service::{MailError, Mailer, OutgoingEmail};

/// Writes outgoing email to the log instead of delivering it.
///
/// The body (which contains one-time links) is logged at `debug` so it stays
/// out of default production logs.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        debug!("Using LogMailer (SMTP not configured)");
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        info!(to = %email.to, subject = %email.subject, "Email not sent (SMTP disabled)");
        debug!(body = %email.body, "Email body");
        Ok(())
    }

    fn describe(&self) -> &'static str {
        "log"
    }
}
