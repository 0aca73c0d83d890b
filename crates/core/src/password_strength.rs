//! Password strength rules for sign-up forms.
//!
//! The server only enforces [`crate::validation::MIN_PASSWORD_LENGTH`]. These
//! stricter rules and the strength meter are what a registration form checks
//! before it submits.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Minimum length of a strong password.
pub const STRONG_PASSWORD_MIN_LEN: usize = 8;
/// Length that earns the bonus in [`password_strength`].
pub const LONG_PASSWORD_LEN: usize = 12;

static UPPERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[A-Z]").expect("valid regex"));
static LOWERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[a-z]").expect("valid regex"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]").expect("valid regex"));
static SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("valid regex"));

/// Coarse rating shown next to the strength meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fair => "Fair",
            StrengthLabel::Good => "Good",
            StrengthLabel::Strong => "Strong",
        }
    }

    fn from_score(score: u8) -> Self {
        match score {
            0..=30 => StrengthLabel::Weak,
            31..=60 => StrengthLabel::Fair,
            61..=80 => StrengthLabel::Good,
            _ => StrengthLabel::Strong,
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score in `0..=100` plus its label.
///
/// An empty password scores 0 with no label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
    pub label: Option<StrengthLabel>,
}

/// Rate a password.
///
/// Length of 8 and of 12 add 20 and 10. Lower-case, upper-case and digit
/// characters add 20 each. A special character adds 10.
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: None,
        };
    }

    let len = password.chars().count();
    let mut score = 0u8;
    if len >= STRONG_PASSWORD_MIN_LEN {
        score += 20;
    }
    if len >= LONG_PASSWORD_LEN {
        score += 10;
    }
    if LOWERCASE_RE.is_match(password) {
        score += 20;
    }
    if UPPERCASE_RE.is_match(password) {
        score += 20;
    }
    if DIGIT_RE.is_match(password) {
        score += 20;
    }
    if SPECIAL_RE.is_match(password) {
        score += 10;
    }

    PasswordStrength {
        score,
        label: Some(StrengthLabel::from_score(score)),
    }
}

/// Check the sign-up form rules on `field`, reporting the first one broken.
pub fn check_strong_password(field: &'static str, password: &str) -> Result<(), CoreError> {
    if password.is_empty() {
        return Err(CoreError::invalid_field(field, "Password is required"));
    }
    let rules: [(bool, &str); 5] = [
        (
            password.chars().count() >= STRONG_PASSWORD_MIN_LEN,
            "Password must be at least 8 characters",
        ),
        (
            UPPERCASE_RE.is_match(password),
            "Password must contain at least one uppercase letter",
        ),
        (
            LOWERCASE_RE.is_match(password),
            "Password must contain at least one lowercase letter",
        ),
        (
            DIGIT_RE.is_match(password),
            "Password must contain at least one number",
        ),
        (
            SPECIAL_RE.is_match(password),
            "Password must contain at least one special character",
        ),
    ];
    match rules.into_iter().find(|(ok, _)| !ok) {
        Some((_, message)) => Err(CoreError::invalid_field(field, message)),
        None => Ok(()),
    }
}
