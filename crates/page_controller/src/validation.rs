//! Contact form rules.
//!
//! Values are measured the way a browser form script measures them: surrounding
//! whitespace is trimmed using the ECMAScript whitespace set (which includes
//! U+FEFF and excludes U+0085), and length is counted in UTF-16 code units. The
//! email check is a shape test (`local@domain.tld`, no whitespace, a single `@`),
//! not an address parser.

use std::sync::OnceLock;

use regex::Regex;
use shared::domain::{ContactField, ContactSubmission};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_MESSAGE_LEN: usize = 10;

/// Regex class body for the same whitespace set as [`is_form_whitespace`].
const WHITESPACE_CLASS: &str =
    r"\t\x0B\x0C \xA0\x{FEFF}\n\r\x{2028}\x{2029}\x{1680}\x{2000}-\x{200A}\x{202F}\x{205F}\x{3000}";

fn email_shape() -> &'static Regex {
    static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();
    EMAIL_SHAPE.get_or_init(|| {
        let part = format!("[^{WHITESPACE_CLASS}@]+");
        Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("valid regex")
    })
}

pub fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{000B}'
            | '\u{000C}'
            | ' '
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\n'
            | '\r'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Length of `value` after trimming, in UTF-16 code units.
pub fn trimmed_len(value: &str) -> usize {
    value.trim_matches(is_form_whitespace).encode_utf16().count()
}

pub fn name_is_valid(value: &str) -> bool {
    trimmed_len(value) >= MIN_NAME_LEN
}

pub fn email_is_valid(value: &str) -> bool {
    email_shape().is_match(value)
}

pub fn message_is_valid(value: &str) -> bool {
    trimmed_len(value) >= MIN_MESSAGE_LEN
}

pub fn field_is_valid(field: ContactField, value: &str) -> bool {
    match field {
        ContactField::Name => name_is_valid(value),
        ContactField::Email => email_is_valid(value),
        ContactField::Message => message_is_valid(value),
    }
}

/// Per-field verdicts. `None` marks a field that was not present and therefore
/// not checked; absent fields never fail the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactValidation {
    pub name: Option<bool>,
    pub email: Option<bool>,
    pub message: Option<bool>,
}

impl ContactValidation {
    pub fn verdict(&self, field: ContactField) -> Option<bool> {
        match field {
            ContactField::Name => self.name,
            ContactField::Email => self.email,
            ContactField::Message => self.message,
        }
    }

    pub fn is_valid(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|field| self.verdict(*field) != Some(false))
    }

    pub fn failed_fields(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|field| self.verdict(*field) == Some(false))
            .collect()
    }
}

/// Check whichever fields are present. Every rule runs; none short-circuits.
pub fn validate_fields(
    name: Option<&str>,
    email: Option<&str>,
    message: Option<&str>,
) -> ContactValidation {
    ContactValidation {
        name: name.map(name_is_valid),
        email: email.map(email_is_valid),
        message: message.map(message_is_valid),
    }
}

pub fn validate_submission(submission: &ContactSubmission) -> ContactValidation {
    validate_fields(
        Some(&submission.name),
        Some(&submission.email),
        Some(&submission.message),
    )
}
