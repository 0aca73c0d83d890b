//! Field validation rules for request bodies.
//!
//! Each rule trims its input where the field is user-facing text and returns
//! the normalized value, or a [`CoreError::InvalidField`] naming the field.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of a project name.
pub const PROJECT_NAME_MAX_LEN: usize = 50;
/// Maximum length of a project description.
pub const PROJECT_DESCRIPTION_MAX_LEN: usize = 200;
/// Minimum length of a project name in the project form. The API itself
/// accepts any non-blank name.
pub const PROJECT_FORM_NAME_MIN_LEN: usize = 3;
/// Maximum length of a display name in the registration form.
pub const USER_NAME_MAX_LEN: usize = 50;
/// Minimum length of a display name on profile update.
pub const PROFILE_NAME_MIN_LEN: usize = 2;
/// Minimum password length for registration and password change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Trim `value` and require it to be non-empty and, when given, at most
/// `max_len` chars.
pub fn required_text(
    field: &'static str,
    value: &str,
    max_len: Option<usize>,
) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_field(field, format!("{field} is required")));
    }
    if let Some(max) = max_len {
        if trimmed.chars().count() > max {
            return Err(CoreError::invalid_field(
                field,
                format!("{field} must be at most {max} characters"),
            ));
        }
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field. Blank input collapses to `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max_len: Option<usize>,
) -> Result<Option<String>, CoreError> {
    let Some(trimmed) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if let Some(max) = max_len {
        if trimmed.chars().count() > max {
            return Err(CoreError::invalid_field(
                field,
                format!("{field} must be at most {max} characters"),
            ));
        }
    }
    Ok(Some(trimmed.to_string()))
}

pub fn validate_project_name(name: &str) -> Result<String, CoreError> {
    required_text("name", name, Some(PROJECT_NAME_MAX_LEN))
}

/// Project form rule: the API rules plus at least
/// [`PROJECT_FORM_NAME_MIN_LEN`] characters.
pub fn check_project_form_name(name: &str) -> Result<String, CoreError> {
    let name = validate_project_name(name)?;
    if name.chars().count() < PROJECT_FORM_NAME_MIN_LEN {
        return Err(CoreError::invalid_field(
            "name",
            format!("Project name must be at least {PROJECT_FORM_NAME_MIN_LEN} characters"),
        ));
    }
    Ok(name)
}

pub fn validate_project_description(description: Option<&str>) -> Result<Option<String>, CoreError> {
    optional_text("description", description, Some(PROJECT_DESCRIPTION_MAX_LEN))
}

pub fn validate_task_title(title: &str) -> Result<String, CoreError> {
    required_text("title", title, None)
}

/// Validate a display name, requiring at least `min_len` characters once trimmed.
pub fn validate_user_name(name: &str, min_len: usize) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_field("name", "Name is required"));
    }
    if trimmed.chars().count() < min_len {
        return Err(CoreError::invalid_field(
            "name",
            format!("Name must be at least {min_len} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Registration form rule: between `PROFILE_NAME_MIN_LEN` and
/// [`USER_NAME_MAX_LEN`] characters once trimmed.
pub fn check_registration_name(name: &str) -> Result<String, CoreError> {
    let name = validate_user_name(name, PROFILE_NAME_MIN_LEN)?;
    if name.chars().count() > USER_NAME_MAX_LEN {
        return Err(CoreError::invalid_field(
            "name",
            format!("Name must be at most {USER_NAME_MAX_LEN} characters"),
        ));
    }
    Ok(name)
}

/// Trim and lower-case an email, then check its syntax.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(CoreError::invalid_field("email", "Email is required"));
    }
    if !normalized.validate_email() {
        return Err(CoreError::invalid_field("email", "Email is invalid"));
    }
    Ok(normalized)
}

/// Enforce the minimum password policy on `field`.
pub fn validate_password(field: &'static str, password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::invalid_field(
            field,
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn project_name_is_trimmed() {
        assert_eq!(validate_project_name("  Work  ").unwrap(), "Work");
    }

    #[test]
    fn blank_project_name_is_rejected() {
        assert_matches!(
            validate_project_name("   "),
            Err(CoreError::InvalidField { field: "name", .. })
        );
    }

    #[test]
    fn overlong_project_name_is_rejected() {
        let name = "x".repeat(PROJECT_NAME_MAX_LEN + 1);
        assert!(validate_project_name(&name).is_err());
        assert!(validate_project_name(&"x".repeat(PROJECT_NAME_MAX_LEN)).is_ok());
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(validate_project_description(Some("   ")).unwrap(), None);
        assert_eq!(validate_project_description(None).unwrap(), None);
        assert_eq!(
            validate_project_description(Some(" notes ")).unwrap().as_deref(),
            Some("notes")
        );
    }

    #[test]
    fn overlong_description_is_rejected() {
        let text = "d".repeat(PROJECT_DESCRIPTION_MAX_LEN + 1);
        assert_matches!(
            validate_project_description(Some(&text)),
            Err(CoreError::InvalidField { field: "description", .. })
        );
    }

    #[test]
    fn task_title_must_not_be_blank() {
        assert!(validate_task_title("").is_err());
        assert_eq!(validate_task_title(" Write report ").unwrap(), "Write report");
    }

    #[test]
    fn task_title_has_no_upper_bound() {
        assert!(validate_task_title(&"t".repeat(1000)).is_ok());
    }

    #[test]
    fn project_form_name_needs_three_characters() {
        assert_matches!(
            check_project_form_name(" ab "),
            Err(CoreError::InvalidField { field: "name", .. })
        );
        assert_eq!(check_project_form_name(" abc ").unwrap(), "abc");
        assert!(check_project_form_name(&"x".repeat(PROJECT_NAME_MAX_LEN + 1)).is_err());
        // The API itself still accepts short names.
        assert!(validate_project_name("ab").is_ok());
    }

    #[test]
    fn registration_name_bounds() {
        assert!(check_registration_name("A").is_err());
        assert!(check_registration_name(&"n".repeat(USER_NAME_MAX_LEN + 1)).is_err());
        assert_eq!(check_registration_name(" Ann ").unwrap(), "Ann");
    }

    #[test]
    fn user_name_minimum_length() {
        assert!(validate_user_name("A", PROFILE_NAME_MIN_LEN).is_err());
        assert_eq!(validate_user_name(" Al ", PROFILE_NAME_MIN_LEN).unwrap(), "Al");
        assert!(validate_user_name("A", 1).is_ok());
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  A@X.com ").unwrap(), "a@x.com");
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert_matches!(
            normalize_email("not-an-email"),
            Err(CoreError::InvalidField { field: "email", .. })
        );
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn password_policy_counts_characters() {
        assert!(validate_password("password", "12345").is_err());
        assert!(validate_password("password", "123456").is_ok());
        assert!(validate_password("password", "Secret123!").is_ok());
    }
}
