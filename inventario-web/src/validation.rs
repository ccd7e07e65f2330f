//! Field validators shared by every form.
//!
//! Validators are pure and synchronous. Each returns the first rule the
//! value breaks; the form-level validators in [`crate::models::forms`] chain
//! them in a fixed priority order.

use crate::config::MAX_AVATAR_BYTES;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum password length for the forced change and profile forms.
pub const STRONG_PASSWORD_MIN: usize = 8;
/// Minimum password length for reset and registration.
pub const BASIC_PASSWORD_MIN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern compiles"));
static ID_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,13}$").expect("id number pattern compiles"));

/// Form fields that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Role,
    IdNumber,
    Password,
    CurrentPassword,
    NewPassword,
    Confirmation,
    Token,
}

impl Field {
    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::IdNumber => "id_number",
            Self::Password => "password",
            Self::CurrentPassword => "current_password",
            Self::NewPassword => "new_password",
            Self::Confirmation => "confirmation",
            Self::Token => "token",
        }
    }
}

/// Validation errors that can occur during form validation.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    /// Field is required but empty
    #[error("{} is required", .0.as_str())]
    Required(Field),
    /// Email address does not look like `user@domain.tld`
    #[error("invalid email address")]
    InvalidEmail,
    /// Phone is not 7 to 15 digits
    #[error("invalid phone number")]
    InvalidPhone,
    /// Identity document is not 10 to 13 digits
    #[error("invalid identity document number")]
    InvalidIdNumber,
    /// Password is shorter than the page minimum
    #[error("password must have at least {min} characters")]
    PasswordTooShort { min: usize },
    /// Password confirmation doesn't match password
    #[error("password confirmation does not match")]
    PasswordsDoNotMatch,
    /// New password equals the current one
    #[error("new password must differ from the current one")]
    PasswordUnchanged,
    /// Selected avatar is not an image
    #[error("avatar must be an image")]
    AvatarNotImage,
    /// Selected avatar exceeds the upload limit
    #[error("avatar exceeds the size limit")]
    AvatarTooLarge,
}

impl ValidationError {
    /// Translation key of the user-facing message.
    pub fn i18n_key(&self) -> String {
        match self {
            Self::Required(field) => format!("validation.required.{}", field.as_str()),
            Self::InvalidEmail => "validation.invalid_email".to_string(),
            Self::InvalidPhone => "validation.invalid_phone".to_string(),
            Self::InvalidIdNumber => "validation.invalid_id_number".to_string(),
            Self::PasswordTooShort { min } => format!("validation.password_too_short.{min}"),
            Self::PasswordsDoNotMatch => "validation.passwords_dont_match".to_string(),
            Self::PasswordUnchanged => "validation.password_unchanged".to_string(),
            Self::AvatarNotImage => "validation.avatar_not_image".to_string(),
            Self::AvatarTooLarge => "validation.avatar_too_large".to_string(),
        }
    }
}

/// Validates that a value is present once surrounding whitespace is removed.
pub fn validate_required(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Validates an email address.
///
/// # Validation rules
/// - Email must not be empty
/// - Email must have a local part, an `@`, and a dotted domain
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    validate_required(email, Field::Email)?;
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validates a password against a page-specific minimum length.
///
/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str, field: Field, min: usize) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required(field));
    }
    if password.chars().count() < min {
        return Err(ValidationError::PasswordTooShort { min });
    }
    Ok(())
}

/// Validates that the password confirmation matches the password.
///
/// # Validation rules
/// - Confirmation must not be empty
/// - Confirmation must match the password exactly
pub fn validate_confirm_password(
    confirm_password: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if confirm_password.is_empty() {
        return Err(ValidationError::Required(Field::Confirmation));
    }
    if confirm_password != password {
        return Err(ValidationError::PasswordsDoNotMatch);
    }
    Ok(())
}

/// Validates that a new password differs from the current one.
pub fn validate_new_differs(new_password: &str, current_password: &str) -> Result<(), ValidationError> {
    if new_password == current_password {
        return Err(ValidationError::PasswordUnchanged);
    }
    Ok(())
}

/// Validates an optional phone number. Blank is accepted.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    if phone.is_empty() || PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// Validates an identity document number (cédula or RUC).
pub fn validate_id_number(id_number: &str) -> Result<(), ValidationError> {
    validate_required(id_number, Field::IdNumber)?;
    if !ID_NUMBER_RE.is_match(id_number.trim()) {
        return Err(ValidationError::InvalidIdNumber);
    }
    Ok(())
}

/// Validates an avatar selection before it is previewed or uploaded.
///
/// # Arguments
/// * `mime_type` - The browser-reported content type of the file
/// * `size` - The file size in bytes
pub fn validate_avatar(mime_type: &str, size: u64) -> Result<(), ValidationError> {
    if !mime_type.starts_with("image/") {
        return Err(ValidationError::AvatarNotImage);
    }
    if size > MAX_AVATAR_BYTES {
        return Err(ValidationError::AvatarTooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email(" ventas@tienda.com.ec ").is_ok());
        assert!(validate_email("user.name+tag@example.com").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert_eq!(validate_email(""), Err(ValidationError::Required(Field::Email)));
        assert_eq!(validate_email("   "), Err(ValidationError::Required(Field::Email)));
        assert_eq!(validate_email("userexample.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("user@localhost"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("us er@example.com"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_validate_password_respects_page_minimum() {
        assert!(validate_password("123456", Field::Password, BASIC_PASSWORD_MIN).is_ok());
        assert_eq!(
            validate_password("123456", Field::NewPassword, STRONG_PASSWORD_MIN),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
        assert_eq!(
            validate_password("", Field::NewPassword, STRONG_PASSWORD_MIN),
            Err(ValidationError::Required(Field::NewPassword))
        );
    }

    #[test]
    fn test_validate_password_counts_characters() {
        // 8 characters, more than 8 bytes
        assert!(validate_password("ñandú123", Field::Password, 8).is_ok());
        assert_eq!(
            validate_password("ñañaña", Field::Password, 8),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
    }

    #[test]
    fn test_validate_confirm_password() {
        assert!(validate_confirm_password("password123", "password123").is_ok());
        assert_eq!(
            validate_confirm_password("", "password123"),
            Err(ValidationError::Required(Field::Confirmation))
        );
        assert_eq!(
            validate_confirm_password("Password123", "password123"),
            Err(ValidationError::PasswordsDoNotMatch)
        );
        assert_eq!(
            validate_confirm_password("password ", "password"),
            Err(ValidationError::PasswordsDoNotMatch)
        );
    }

    #[test]
    fn test_validate_new_differs() {
        assert!(validate_new_differs("nueva123", "vieja123").is_ok());
        assert_eq!(
            validate_new_differs("misma123", "misma123"),
            Err(ValidationError::PasswordUnchanged)
        );
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("0991234567").is_ok());
        assert!(validate_phone("+593991234567").is_ok());
        assert_eq!(validate_phone("099-123"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_phone("12345"), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_validate_id_number() {
        assert!(validate_id_number("0102030405").is_ok());
        assert!(validate_id_number("0102030405001").is_ok());
        assert_eq!(
            validate_id_number(""),
            Err(ValidationError::Required(Field::IdNumber))
        );
        assert_eq!(validate_id_number("01020"), Err(ValidationError::InvalidIdNumber));
        assert_eq!(validate_id_number("01020304AB"), Err(ValidationError::InvalidIdNumber));
    }

    #[test]
    fn test_validate_avatar() {
        assert!(validate_avatar("image/png", 1024).is_ok());
        assert!(validate_avatar("image/jpeg", MAX_AVATAR_BYTES).is_ok());
        assert_eq!(
            validate_avatar("application/pdf", 1024),
            Err(ValidationError::AvatarNotImage)
        );
        assert_eq!(
            validate_avatar("image/png", MAX_AVATAR_BYTES + 1),
            Err(ValidationError::AvatarTooLarge)
        );
        // Type is checked before size
        assert_eq!(
            validate_avatar("text/plain", MAX_AVATAR_BYTES * 4),
            Err(ValidationError::AvatarNotImage)
        );
    }

    #[test]
    fn test_i18n_keys() {
        assert_eq!(
            ValidationError::Required(Field::CurrentPassword).i18n_key(),
            "validation.required.current_password"
        );
        assert_eq!(
            ValidationError::PasswordTooShort { min: 6 }.i18n_key(),
            "validation.password_too_short.6"
        );
        assert_eq!(
            ValidationError::PasswordUnchanged.i18n_key(),
            "validation.password_unchanged"
        );
    }
}
