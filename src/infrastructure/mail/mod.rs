//! Transactional email delivery.
//!
//! [`SmtpMailer`] is used when SMTP settings are present, otherwise
//! [`LogMailer`] keeps the verification and reset flows usable in development.

pub mod log_mailer;
pub mod service;
pub mod smtp_mailer;
pub mod templates;

pub use log_mailer::LogMailer;
pub use service::{MailError, Mailer, OutgoingEmail};
pub use smtp_mailer::SmtpMailer;

#[cfg(test)]
pub use service::MockMailer;
