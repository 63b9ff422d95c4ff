//! Input validation utilities
//!
//! Validation failures carry a field name alongside the message so clients
//! receive a structured error list in addition to the top-level message.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::models::{CustomerDetails, LoginRequest, SignupRequest};

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.len() < 2 {
        return Err("Name must be at least 2 characters long".to_string());
    }

    if name.len() > 100 {
        return Err("Name must be at most 100 characters long".to_string());
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a signup payload, collecting every field failure
pub fn validate_signup(payload: &SignupRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Err(message) = validate_name(&payload.name) {
        errors.push(FieldError::new("name", &message));
    }
    if let Err(message) = validate_email(&payload.email) {
        errors.push(FieldError::new("email", &message));
    }
    if let Err(message) = validate_password(&payload.password) {
        errors.push(FieldError::new("password", &message));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a login payload shape (credential checks happen elsewhere)
pub fn validate_login(payload: &LoginRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Err(message) = validate_email(&payload.email) {
        errors.push(FieldError::new("email", &message));
    }
    if payload.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate the delivery details required to place an order
pub fn validate_customer_details(details: &CustomerDetails) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if details.name.trim().is_empty() {
        errors.push(FieldError::new("customerDetails.name", "Name is required"));
    }
    if details.address.trim().is_empty() {
        errors.push(FieldError::new(
            "customerDetails.address",
            "Address is required",
        ));
    }
    if details.contact.trim().is_empty() {
        errors.push(FieldError::new(
            "customerDetails.contact",
            "Contact is required",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Anu Kumar").is_ok());
        assert!(validate_name("Al").is_ok());
        assert!(validate_name("A").is_err());
        assert!(validate_name("  A  ").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("anu@x.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.co").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@x.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_signup_collects_all_errors() {
        let payload = SignupRequest {
            name: "A".to_string(),
            email: "bad".to_string(),
            password: "123".to_string(),
        };

        let errors = validate_signup(&payload).unwrap_err();
        assert_eq!(errors.len(), 3);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[test]
    fn test_validate_signup_accepts_valid_payload() {
        let payload = SignupRequest {
            name: "Anu Kumar".to_string(),
            email: "anu@x.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(validate_signup(&payload).is_ok());
    }

    #[test]
    fn test_validate_customer_details() {
        let valid = CustomerDetails {
            name: "Anu Kumar".to_string(),
            address: "12 Gandhi Maidan, Patna".to_string(),
            contact: "9876543210".to_string(),
            location: String::new(),
            payment_method: "Cash on Delivery".to_string(),
        };
        assert!(validate_customer_details(&valid).is_ok());

        let missing = CustomerDetails::default();
        let errors = validate_customer_details(&missing).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.field.starts_with("customerDetails.")));
    }

    #[test]
    fn test_blank_customer_fields_rejected() {
        let blank = CustomerDetails {
            name: "   ".to_string(),
            address: "somewhere".to_string(),
            contact: "123".to_string(),
            ..CustomerDetails::default()
        };
        let errors = validate_customer_details(&blank).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "customerDetails.name");
    }
}
