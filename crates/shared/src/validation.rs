//! Common validation utilities.
//!
//! Functions returning `Result<(), ValidationError>` plug into
//! `#[validate(custom(function = "..."))]` on request models.

use validator::{ValidateEmail, ValidateUrl, ValidationError};

lazy_static::lazy_static! {
    static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9][0-9 ()\-]{5,22}$").unwrap();
}

/// Canonical form for stored email addresses: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Returns true when the address is a syntactically valid email.
pub fn is_valid_email(email: &str) -> bool {
    email.trim().validate_email()
}

/// Rejects strings that are empty or whitespace only.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a loosely formatted phone number (digits, spaces, dashes,
/// parentheses, optional leading +).
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Invalid phone number".into());
        Err(err)
    }
}

/// Validates an absolute http(s) URL.
pub fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    let trimmed = url.trim();
    if trimmed.validate_url() && (trimmed.starts_with("http://") || trimmed.starts_with("https://"))
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("url_format");
        err.message = Some("Must be an http(s) URL".into());
        Err(err)
    }
}

/// Validates that a display order is not negative.
pub fn validate_display_order(order: i32) -> Result<(), ValidationError> {
    if order >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("display_order_range");
        err.message = Some("Display order must be non-negative".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A.Ben@X.com "), "a.ben@x.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email(" speaker@tedx.org "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("TEDx").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   \t").is_err());
    }

    #[test]
    fn test_validate_not_blank_error_message() {
        let err = validate_not_blank(" ").unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Value must not be blank");
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+216 22 333 444").is_ok());
        assert!(validate_phone("(555) 123-4567").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me maybe").is_err());
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("https://www.linkedin.com/in/someone").is_ok());
        assert!(validate_http_url("http://tedx.example.org").is_ok());
        assert!(validate_http_url("ftp://files.example.org").is_err());
        assert!(validate_http_url("linkedin.com/in/someone").is_err());
    }

    #[test]
    fn test_validate_display_order() {
        assert!(validate_display_order(0).is_ok());
        assert!(validate_display_order(12).is_ok());
        assert!(validate_display_order(-1).is_err());
    }

    #[test]
    fn test_generated_emails_are_valid() {
        use fake::faker::internet::en::SafeEmail;
        use fake::Fake;

        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert!(is_valid_email(&email), "{}", email);
            assert!(is_valid_email(&email.to_uppercase()));
        }
    }
}
