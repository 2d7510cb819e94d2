use shared::{
    domain::ContactSubmission,
    error::{ApiError, ErrorCode},
    protocol::{ApiData, ApiStatus},
};
use tracing::info;

/// Payload behind `GET /api/data`.
pub fn api_data() -> ApiData {
    ApiData {
        message: "Hello from the page server!".into(),
        status: ApiStatus::Success,
        data: vec![1, 2, 3, 4, 5],
    }
}

/// Outcome of a contact form post. The form is accepted as sent; checks run in
/// the browser before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactReceipt {
    pub name_chars: usize,
    pub message_chars: usize,
}

pub fn accept_contact(submission: &ContactSubmission) -> ContactReceipt {
    let receipt = ContactReceipt {
        name_chars: submission.name.trim().chars().count(),
        message_chars: submission.message.trim().chars().count(),
    };
    info!(
        name_chars = receipt.name_chars,
        message_chars = receipt.message_chars,
        has_email = !submission.email.trim().is_empty(),
        "contact form received"
    );
    receipt
}

pub fn unknown_api_route(path: &str) -> ApiError {
    ApiError::new(ErrorCode::NotFound, format!("no api route at {path}"))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
