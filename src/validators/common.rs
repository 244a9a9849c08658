//! Common validation utilities and helpers.

use validator::ValidationErrors;

use crate::errors::{ApiError, FieldErrors};

/// Convert validator errors to ApiError::Validation.
///
/// Messages are grouped by field so clients can attach them to form inputs.
///
/// # Example
/// ```ignore
/// body.validate().map_err(|e| validation_errors_to_api_error(ERR_INVALID_FIELD, e))?;
/// ```
pub fn validation_errors_to_api_error(message: &str, e: ValidationErrors) -> ApiError {
    let mut errors = FieldErrors::new();
    for (field, errs) in e.field_errors() {
        let messages = errs
            .iter()
            .map(|err| {
                err.message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid.", field))
            })
            .collect();
        errors.insert(field.to_string(), messages);
    }
    ApiError::Validation {
        message: message.to_string(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;
    use crate::constants::{ERR_INVALID_FIELD, ERR_VALIDATION};
    use crate::models::{LoginRequest, RegisterRequest};

    fn field_errors(err: ApiError) -> FieldErrors {
        match err {
            ApiError::Validation { errors, .. } => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    fn register(body: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_register_missing_fields_are_required() {
        let req = register(serde_json::json!({}));
        let errors = field_errors(validation_errors_to_api_error(
            ERR_INVALID_FIELD,
            req.validate().unwrap_err(),
        ));

        assert_eq!(errors["full_name"], vec!["The full name field is required."]);
        assert_eq!(errors["bio"], vec!["The bio field is required."]);
        assert_eq!(errors["username"], vec!["The username field is required."]);
        assert_eq!(errors["password"], vec!["The password field is required."]);
    }

    #[test]
    fn test_register_blank_strings_count_as_missing() {
        let req = register(serde_json::json!({
            "full_name": "   ",
            "bio": "",
            "username": "jane",
            "password": "secret1"
        }));
        let errors = field_errors(validation_errors_to_api_error(
            ERR_INVALID_FIELD,
            req.validate().unwrap_err(),
        ));

        assert!(errors.contains_key("full_name"));
        assert!(errors.contains_key("bio"));
        assert!(!errors.contains_key("username"));
    }

    #[test]
    fn test_register_username_rules() {
        let cases = [
            ("ab", "The username field must be between 3 and 100 characters."),
            ("jane doe", "The username field format is invalid."),
            ("jane-doe", "The username field format is invalid."),
        ];

        for (username, expected) in cases {
            let req = register(serde_json::json!({
                "full_name": "Jane",
                "bio": "bio",
                "username": username,
                "password": "secret1"
            }));
            let errors = field_errors(validation_errors_to_api_error(
                ERR_INVALID_FIELD,
                req.validate().unwrap_err(),
            ));
            assert!(
                errors["username"].iter().any(|m| m == expected),
                "{} should fail with {:?}, got {:?}",
                username,
                expected,
                errors["username"]
            );
        }
    }

    #[test]
    fn test_register_accepts_dots_and_underscores() {
        let req = register(serde_json::json!({
            "full_name": "Jane Doe",
            "bio": "Hello",
            "username": "jane.doe_99",
            "password": "secret1",
            "is_private": true
        }));
        assert!(req.validate().is_ok());
        assert!(req.is_private);
    }

    #[test]
    fn test_register_length_limits() {
        let req = register(serde_json::json!({
            "full_name": "x".repeat(256),
            "bio": "x".repeat(101),
            "username": "x".repeat(101),
            "password": "x".repeat(101)
        }));
        let errors = field_errors(validation_errors_to_api_error(
            ERR_INVALID_FIELD,
            req.validate().unwrap_err(),
        ));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_login_password_minimum() {
        let req: LoginRequest =
            serde_json::from_value(serde_json::json!({"username": "jane", "password": "12345"}))
                .unwrap();
        let err = validation_errors_to_api_error(ERR_VALIDATION, req.validate().unwrap_err());
        match err {
            ApiError::Validation { message, errors } => {
                assert_eq!(message, ERR_VALIDATION);
                assert_eq!(
                    errors["password"],
                    vec!["The password field must be at least 6 characters."]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
