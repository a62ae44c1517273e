use crate::domain::model::ContactRequest;
use crate::utils::error::{Result, StudyBuddyError};
use crate::utils::validation::{is_valid_email, require_text, text_or};

pub const ACKNOWLEDGEMENT: &str = "Your message has been received. We will get back to you soon!";

/// Validates a contact-form message and records it in the log.
pub fn accept_message(request: &ContactRequest) -> Result<()> {
    let name = require_text("Name", &request.name)?;
    let email = require_text("Email", &request.email)?;
    let message = require_text("Message", &request.message)?;

    if !is_valid_email(email) {
        return Err(StudyBuddyError::validation("Invalid email address"));
    }

    tracing::info!(
        name,
        email,
        subject = text_or(&request.subject, "General inquiry"),
        message_chars = message.len(),
        "Contact message received"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str) -> ContactRequest {
        ContactRequest {
            name: Some("Ravi".to_string()),
            email: Some(email.to_string()),
            message: Some("The quiz page is great".to_string()),
            subject: None,
        }
    }

    #[test]
    fn test_accepts_valid_message() {
        assert!(accept_message(&request("ravi@example.com")).is_ok());
    }

    #[test]
    fn test_rejects_invalid_email() {
        let err = accept_message(&request("ravi@example")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid email address");
    }

    #[test]
    fn test_required_fields() {
        let mut missing = request("ravi@example.com");
        missing.message = Some("  ".to_string());
        assert_eq!(
            accept_message(&missing).unwrap_err().to_string(),
            "Message is required"
        );

        let err = accept_message(&ContactRequest::default()).unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }
}
