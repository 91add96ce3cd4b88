//! Plain-text email bodies rendered with Askama.

use askama::Template;

use super::service::{MailError, OutgoingEmail};

#[derive(Template)]
#[template(path = "email/verify_email.txt")]
struct VerifyEmailText<'a> {
    name: &'a str,
    link: &'a str,
}

#[derive(Template)]
#[template(path = "email/resend_verification.txt")]
struct ResendVerificationText<'a> {
    link: &'a str,
}

#[derive(Template)]
#[template(path = "email/reset_password.txt")]
struct ResetPasswordText<'a> {
    link: &'a str,
    minutes: i64,
}

/// Welcome email sent right after registration.
pub fn verification_email(to: &str, name: &str, link: &str) -> Result<OutgoingEmail, MailError> {
    Ok(OutgoingEmail {
        to: to.to_string(),
        subject: "TradeLink Email Verification".to_string(),
        body: VerifyEmailText { name, link }.render()?,
    })
}

/// Shorter email used when the user asks for a new verification link.
pub fn resend_verification_email(to: &str, link: &str) -> Result<OutgoingEmail, MailError> {
    Ok(OutgoingEmail {
        to: to.to_string(),
        subject: "TradeLink Email Verification".to_string(),
        body: ResendVerificationText { link }.render()?,
    })
}

pub fn password_reset_email(
    to: &str,
    link: &str,
    minutes: i64,
) -> Result<OutgoingEmail, MailError> {
    Ok(OutgoingEmail {
        to: to.to_string(),
        subject: "TradeLink Password Reset".to_string(),
        body: ResetPasswordText { link, minutes }.render()?,
    })
}
