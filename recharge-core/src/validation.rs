//! Form validation run before any request is made.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{MIN_PASSWORD_LEN, MOBILE_DIGITS};
use crate::error::ValidationError;
use crate::plan::PlanDraft;

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Keep only ASCII digits, capped at the mobile length. Used on every keystroke.
#[must_use]
pub fn sanitize_mobile_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MOBILE_DIGITS)
        .collect()
}

/// # Errors
///
/// Fails unless `mobile` is exactly ten ASCII digits.
pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::MobileDigits);
    }
    if mobile.len() != MOBILE_DIGITS {
        return Err(ValidationError::MobileLength {
            expected: MOBILE_DIGITS,
        });
    }
    Ok(())
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

/// Login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validate the login form, reporting every field error at once.
///
/// # Errors
///
/// Returns the list of field errors when the form is not submittable.
pub fn validate_login(creds: &Credentials) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if creds.email.trim().is_empty() {
        errors.push(ValidationError::Required { field: "Email" });
    } else if !is_valid_email(&creds.email) {
        errors.push(ValidationError::InvalidEmail);
    }
    if creds.password.is_empty() {
        errors.push(ValidationError::Required { field: "Password" });
    } else if creds.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub confirm_password: String,
    pub user_type: crate::session::Role,
}

/// # Errors
///
/// Returns the first failing rule: a missing field, then a password mismatch.
pub fn validate_registration(form: &Registration) -> Result<(), ValidationError> {
    let required = [
        ("Name", &form.name),
        ("Email", &form.email),
        ("Mobile", &form.mobile),
        ("Password", &form.password),
    ];
    if let Some(&(field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(ValidationError::Required { field });
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// # Errors
///
/// Fails when the price is not positive or a required text field is blank.
pub fn validate_plan_draft(draft: &PlanDraft) -> Result<(), ValidationError> {
    if draft.price <= 0 {
        return Err(ValidationError::InvalidPrice);
    }
    let required = [
        ("Operator", &draft.operator),
        ("Validity", &draft.validity),
        ("Data", &draft.data),
        ("Call", &draft.call),
    ];
    if let Some(&(field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_must_be_ten_digits() {
        assert!(validate_mobile("9876543210").is_ok());
        assert_eq!(
            validate_mobile("98765"),
            Err(ValidationError::MobileLength { expected: 10 })
        );
        assert_eq!(
            validate_mobile("98765x3210"),
            Err(ValidationError::MobileDigits)
        );
        assert!(validate_mobile("").is_err());
    }

    #[test]
    fn sanitize_drops_non_digits_and_caps_length() {
        assert_eq!(sanitize_mobile_input("+91 98765-43210"), "9198765432");
        assert_eq!(sanitize_mobile_input("abc"), "");
    }

    #[test]
    fn login_reports_all_field_errors() {
        let errors = validate_login(&Credentials {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        })
        .unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidEmail,
                ValidationError::PasswordTooShort { min: 6 }
            ]
        );
        assert!(
            validate_login(&Credentials {
                email: "asha@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .is_ok()
        );
    }

    #[test]
    fn registration_checks_required_then_confirmation() {
        let mut form = Registration {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            mobile: String::new(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
            ..Registration::default()
        };
        assert_eq!(
            validate_registration(&form),
            Err(ValidationError::Required { field: "Mobile" })
        );
        form.mobile = "9876543210".to_string();
        assert_eq!(
            validate_registration(&form),
            Err(ValidationError::PasswordMismatch)
        );
        form.confirm_password = "secret1".to_string();
        assert!(validate_registration(&form).is_ok());
    }

    #[test]
    fn plan_draft_needs_price_and_allowances() {
        let mut draft = PlanDraft::default();
        assert_eq!(
            validate_plan_draft(&draft),
            Err(ValidationError::InvalidPrice)
        );
        draft.price = 299;
        assert_eq!(
            validate_plan_draft(&draft),
            Err(ValidationError::Required { field: "Validity" })
        );
        draft.validity = "28 Days".to_string();
        draft.data = "2GB/day".to_string();
        draft.call = "Unlimited".to_string();
        assert!(validate_plan_draft(&draft).is_ok());
    }
}
