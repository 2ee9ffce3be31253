//! Password policy enforcement for new passwords.

use eduhub_core::config::AuthConfig;
use eduhub_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Every rule the password breaks, in a fixed order.
    ///
    /// `user_inputs` (email, name) are penalized by the entropy check.
    pub fn violations(&self, password: &str, user_inputs: &[&str]) -> Vec<String> {
        let mut problems = Vec::new();

        if password.chars().count() < self.min_length {
            problems.push(format!(
                "must be at least {} characters long",
                self.min_length
            ));
        }
        if !password.chars().any(char::is_uppercase) {
            problems.push("must contain an uppercase letter".to_string());
        }
        if !password.chars().any(char::is_lowercase) {
            problems.push("must contain a lowercase letter".to_string());
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            problems.push("must contain a digit".to_string());
        }
        if !password.chars().any(|c| !c.is_alphanumeric()) {
            problems.push("must contain a special character".to_string());
        }

        if problems.is_empty() {
            let estimate = zxcvbn::zxcvbn(password, user_inputs);
            if estimate.score() < zxcvbn::Score::Three {
                problems.push("is too easy to guess".to_string());
            }
        }

        problems
    }

    /// Fails with a validation error listing every broken rule.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        let problems = self.violations(password, user_inputs);
        if problems.is_empty() {
            return Ok(());
        }
        Err(AppError::validation(format!(
            "Password {}",
            problems.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_strong_password_passes() {
        assert!(validator().validate("Quartz-Lantern-88!", &[]).is_ok());
    }

    #[test]
    fn test_reports_every_class_violation() {
        let problems = validator().violations("abc", &[]);
        assert_eq!(problems.len(), 4);
        assert!(problems[0].contains("8 characters"));
    }

    #[test]
    fn test_guessable_password_rejected() {
        let err = validator().validate("Password1!", &[]).unwrap_err();
        assert!(err.message.contains("too easy"));
    }

    #[test]
    fn test_user_inputs_lower_the_score() {
        let v = validator();
        let inputs = ["jordankeller@school.edu", "jordankeller"];
        assert!(v.validate("Jordankeller1!", &inputs).is_err());
    }
}
