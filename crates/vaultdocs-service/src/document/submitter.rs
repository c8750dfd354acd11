//! Submitter name and email validation.

use std::sync::LazyLock;

use regex::Regex;

use vaultdocs_core::error::AppError;
use vaultdocs_core::result::AppResult;

use super::naming::normalize_name;

/// Minimum length of a submitter name, after trimming.
pub const NAME_MIN_LEN: usize = 2;
/// Maximum length of a submitter name, after trimming.
pub const NAME_MAX_LEN: usize = 100;
/// Maximum length of a submitter email, after trimming.
pub const EMAIL_MAX_LEN: usize = 255;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid name regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("valid email regex")
});

/// A validated submitter identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    /// Trimmed display name.
    pub name: String,
    /// Trimmed, lowercase email address.
    pub email: String,
}

impl Submitter {
    /// Validate and normalize raw form input.
    pub fn parse(name: &str, email: &str) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        let len = name.chars().count();
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
            return Err(AppError::validation(format!(
                "Name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
            )));
        }
        if !NAME_RE.is_match(name) {
            return Err(AppError::validation(format!(
                "{name} is not a valid name. Only letters and spaces are allowed."
            )));
        }

        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        if email.chars().count() > EMAIL_MAX_LEN {
            return Err(AppError::validation(format!(
                "Email must be at most {EMAIL_MAX_LEN} characters"
            )));
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(AppError::validation(format!(
                "{email} is not a valid email address."
            )));
        }

        Ok(Self {
            name: name.to_string(),
            email,
        })
    }

    /// Whether this submitter is the owner of an existing record.
    ///
    /// Names are compared the way storage filenames are derived from them.
    pub fn owns(&self, name: &str, email: &str) -> bool {
        self.email == email.trim().to_lowercase()
            && normalize_name(&self.name) == normalize_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submitter_is_normalized() {
        let s = Submitter::parse("  Jane Doe ", " Jane@X.com ").unwrap();
        assert_eq!(s.name, "Jane Doe");
        assert_eq!(s.email, "jane@x.com");
    }

    #[test]
    fn test_name_rules() {
        assert!(Submitter::parse("", "a@b.com").is_err());
        assert!(Submitter::parse("J", "a@b.com").is_err());
        assert!(Submitter::parse("Jane D0e", "a@b.com").is_err());
        assert!(Submitter::parse(&"a".repeat(101), "a@b.com").is_err());
        assert!(Submitter::parse(&"a".repeat(100), "a@b.com").is_ok());
        assert!(Submitter::parse("Jo", "a@b.com").is_ok());
    }

    #[test]
    fn test_email_rules() {
        assert!(Submitter::parse("Jane Doe", "").is_err());
        assert!(Submitter::parse("Jane Doe", "jane").is_err());
        assert!(Submitter::parse("Jane Doe", "jane@x").is_err());
        assert!(Submitter::parse("Jane Doe", "jane@x.abcd").is_err());
        assert!(Submitter::parse("Jane Doe", "jane.doe-1@mail.example.org").is_ok());
    }

    #[test]
    fn test_email_length_limit() {
        let at_limit = format!("{}@x.com", "a".repeat(EMAIL_MAX_LEN - 6));
        assert_eq!(at_limit.len(), EMAIL_MAX_LEN);
        assert!(Submitter::parse("Jane Doe", &at_limit).is_ok());

        let over = format!("{}@x.com", "a".repeat(EMAIL_MAX_LEN - 5));
        let err = Submitter::parse("Jane Doe", &over).unwrap_err();
        assert_eq!(err.message, "Email must be at most 255 characters");
    }

    #[test]
    fn test_owns_ignores_case() {
        let s = Submitter::parse("Jane Doe", "jane@x.com").unwrap();
        assert!(s.owns("jane doe", "JANE@x.com"));
        assert!(s.owns("Jane   Doe", "jane@x.com"));
        assert!(!s.owns("John Doe", "jane@x.com"));
        assert!(!s.owns("Jane Doe", "other@x.com"));
    }
}
