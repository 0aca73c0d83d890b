//! Form checks a UI runs before calling [`crate::ApiClient`].
//!
//! They are stricter than the API: registration requires a strong password
//! and project names need at least three characters.

use nexustrack_core::error::CoreError;
use nexustrack_core::project_color::validate_color;
use nexustrack_core::validation::{
    check_project_form_name, check_registration_name, normalize_email, validate_project_description,
};

pub use nexustrack_core::password_strength::{
    check_strong_password, password_strength, PasswordStrength, StrengthLabel,
};

use crate::models::ProjectInput;

/// A message to show next to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn from_core(fallback_field: &'static str, err: CoreError) -> Self {
        match err {
            CoreError::InvalidField { field, message } => FieldError { field, message },
            other => FieldError {
                field: fallback_field,
                message: other.to_string(),
            },
        }
    }
}

/// Push the error of `result`, if any, onto `errors`.
fn collect<T>(errors: &mut Vec<FieldError>, field: &'static str, result: Result<T, CoreError>) {
    if let Err(err) = result {
        errors.push(FieldError::from_core(field, err));
    }
}

/// Fields of the sign-up form.
#[derive(Debug, Clone, Copy)]
pub struct RegisterForm<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

impl RegisterForm<'_> {
    /// Every broken rule, at most one per field, in form order.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        collect(&mut errors, "name", check_registration_name(self.name));
        collect(&mut errors, "email", normalize_email(self.email));
        collect(
            &mut errors,
            "password",
            check_strong_password("password", self.password),
        );
        if self.confirm_password.is_empty() {
            errors.push(FieldError {
                field: "confirmPassword",
                message: "Please confirm your password".to_string(),
            });
        } else if self.confirm_password != self.password {
            errors.push(FieldError {
                field: "confirmPassword",
                message: "Passwords do not match".to_string(),
            });
        }
        errors
    }

    pub fn strength(&self) -> PasswordStrength {
        password_strength(self.password)
    }
}

/// Check a project form before create or update.
pub fn validate_project_input(input: &ProjectInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    collect(&mut errors, "name", check_project_form_name(&input.name));
    collect(
        &mut errors,
        "description",
        validate_project_description(input.description.as_deref()),
    );
    collect(&mut errors, "color", validate_color(input.color.as_deref()));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn valid_registration_has_no_errors() {
        let form = RegisterForm {
            name: "Ann",
            email: "ann@example.com",
            password: "Secret123!",
            confirm_password: "Secret123!",
        };
        assert!(form.validate().is_empty());
        assert_eq!(form.strength().score, 90);
        assert_eq!(form.strength().label, Some(StrengthLabel::Strong));
    }

    #[test]
    fn registration_reports_each_field() {
        let form = RegisterForm {
            name: "A",
            email: "nope",
            password: "secret",
            confirm_password: "other",
        };
        let errors = form.validate();
        assert_eq!(
            fields(&errors),
            vec!["name", "email", "password", "confirmPassword"]
        );
        assert_eq!(errors[2].message, "Password must be at least 8 characters");
        assert_eq!(errors[3].message, "Passwords do not match");
    }

    #[test]
    fn missing_confirmation_is_reported() {
        let form = RegisterForm {
            name: "Ann",
            email: "ann@example.com",
            password: "Secret123!",
            confirm_password: "",
        };
        let errors = form.validate();
        assert_eq!(fields(&errors), vec!["confirmPassword"]);
        assert_eq!(errors[0].message, "Please confirm your password");
    }

    #[test]
    fn project_form_rules() {
        let short = ProjectInput {
            name: "ab".to_string(),
            ..ProjectInput::default()
        };
        assert_eq!(fields(&validate_project_input(&short)), vec!["name"]);

        let bad_color = ProjectInput {
            name: "Work".to_string(),
            description: Some("d".repeat(201)),
            color: Some("blue".to_string()),
        };
        assert_eq!(
            fields(&validate_project_input(&bad_color)),
            vec!["description", "color"]
        );

        let ok = ProjectInput {
            name: "Work".to_string(),
            description: None,
            color: Some("#10B981".to_string()),
        };
        assert!(validate_project_input(&ok).is_empty());
    }
}
