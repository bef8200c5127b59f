//! Getting the drafted email out: a `mailto:` link for the user's own mail
//! client, or a direct SMTP send.

pub mod smtp;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

pub use smtp::SmtpMailer;

/// Everything except unreserved characters and `/` is escaped.
const MAILTO_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, Error)]
pub enum OutreachError {
    #[error("No recipients given")]
    NoRecipients,

    #[error("SMTP credentials are not configured (set SMTP_USERNAME and SMTP_PASSWORD)")]
    NotConfigured,

    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Builds `mailto:<a>,<b>?subject=..&body=..` with subject and body percent-encoded.
/// Recipients are joined as given.
pub fn build_mailto(recipients: &[String], subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipients.join(","),
        utf8_percent_encode(subject, MAILTO_COMPONENT),
        utf8_percent_encode(body, MAILTO_COMPONENT)
    )
}
