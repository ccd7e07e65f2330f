//! Form state for every page and the request each one produces once valid.
//!
//! Rules are evaluated in a fixed order (required, format, length,
//! confirmation, differs-from-current) and the first violation wins.

use crate::validation::{
    BASIC_PASSWORD_MIN, Field, STRONG_PASSWORD_MIN, ValidationError, validate_confirm_password,
    validate_email, validate_id_number, validate_new_differs, validate_password, validate_phone,
    validate_required,
};
use shared::models::{
    ForcedPasswordChangeRequest, ForgotPasswordRequest, LoginRequest, PasswordChangeRequest,
    Profile, ProfileUpdate, RegisterRequest, ResetPasswordRequest, UserRole,
};

/// A form that can turn its current values into a backend request.
pub trait FormModel {
    /// Request body produced by a valid form.
    type Request;

    /// Check every rule in priority order and build the request.
    ///
    /// # Errors
    /// The first rule the current values violate.
    fn validate(&self) -> Result<Self::Request, ValidationError>;
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormModel for LoginForm {
    type Request = LoginRequest;

    fn validate(&self) -> Result<LoginRequest, ValidationError> {
        validate_email(&self.email)?;
        validate_required(&self.password, Field::Password)?;
        Ok(LoginRequest {
            email: trimmed(&self.email),
            password: self.password.clone(),
        })
    }
}

/// Shared shape of the two "current + new + confirmation" forms.
fn validate_password_triplet(
    current: &str,
    new: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if current.is_empty() {
        return Err(ValidationError::Required(Field::CurrentPassword));
    }
    validate_password(new, Field::NewPassword, STRONG_PASSWORD_MIN)?;
    validate_confirm_password(confirmation, new)?;
    validate_new_differs(new, current)
}

/// Forced change of a temporary password after first login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForcedPasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirmation: String,
}

impl ForcedPasswordForm {
    pub fn clear_passwords(&mut self) {
        *self = Self::default();
    }
}

impl FormModel for ForcedPasswordForm {
    type Request = ForcedPasswordChangeRequest;

    fn validate(&self) -> Result<ForcedPasswordChangeRequest, ValidationError> {
        validate_password_triplet(&self.current_password, &self.new_password, &self.confirmation)?;
        Ok(ForcedPasswordChangeRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            new_password_confirmation: self.confirmation.clone(),
        })
    }
}

/// Password change from the profile security section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirmation: String,
}

impl PasswordChangeForm {
    pub fn clear_passwords(&mut self) {
        *self = Self::default();
    }
}

impl FormModel for PasswordChangeForm {
    type Request = PasswordChangeRequest;

    fn validate(&self) -> Result<PasswordChangeRequest, ValidationError> {
        validate_password_triplet(&self.current_password, &self.new_password, &self.confirmation)?;
        Ok(PasswordChangeRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            new_password_confirmation: self.confirmation.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl FormModel for ForgotPasswordForm {
    type Request = ForgotPasswordRequest;

    fn validate(&self) -> Result<ForgotPasswordRequest, ValidationError> {
        validate_email(&self.email)?;
        Ok(ForgotPasswordRequest {
            email: trimmed(&self.email),
        })
    }
}

/// Reset via e-mailed token. The token comes from the route, not the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub token: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

impl ResetPasswordForm {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn clear_passwords(&mut self) {
        self.password.clear();
        self.confirmation.clear();
    }
}

impl FormModel for ResetPasswordForm {
    type Request = ResetPasswordRequest;

    fn validate(&self) -> Result<ResetPasswordRequest, ValidationError> {
        validate_required(&self.token, Field::Token)?;
        validate_email(&self.email)?;
        validate_password(&self.password, Field::Password, BASIC_PASSWORD_MIN)?;
        validate_confirm_password(&self.confirmation, &self.password)?;
        Ok(ResetPasswordRequest {
            token: self.token.clone(),
            email: trimmed(&self.email),
            password: self.password.clone(),
            password_confirmation: self.confirmation.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub id_number: String,
    pub phone: String,
    pub password: String,
    pub confirmation: String,
}

impl RegisterForm {
    pub fn clear_passwords(&mut self) {
        self.password.clear();
        self.confirmation.clear();
    }
}

impl FormModel for RegisterForm {
    type Request = RegisterRequest;

    fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        validate_required(&self.name, Field::Name)?;
        validate_email(&self.email)?;
        let role = self.role.ok_or(ValidationError::Required(Field::Role))?;
        validate_id_number(&self.id_number)?;
        validate_phone(&self.phone)?;
        validate_password(&self.password, Field::Password, BASIC_PASSWORD_MIN)?;
        validate_confirm_password(&self.confirmation, &self.password)?;
        let phone = trimmed(&self.phone);
        Ok(RegisterRequest {
            name: trimmed(&self.name),
            email: trimmed(&self.email),
            role,
            id_number: trimmed(&self.id_number),
            phone: (!phone.is_empty()).then_some(phone),
            password: self.password.clone(),
            password_confirmation: self.confirmation.clone(),
        })
    }
}

/// Editable identity fields of the profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Profile> for ProfileForm {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
        }
    }
}

impl FormModel for ProfileForm {
    type Request = ProfileUpdate;

    fn validate(&self) -> Result<ProfileUpdate, ValidationError> {
        validate_required(&self.name, Field::Name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        let phone = trimmed(&self.phone);
        Ok(ProfileUpdate {
            name: trimmed(&self.name),
            email: trimmed(&self.email),
            phone: (!phone.is_empty()).then_some(phone),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forced(current: &str, new: &str, confirmation: &str) -> ForcedPasswordForm {
        ForcedPasswordForm {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirmation: confirmation.to_string(),
        }
    }

    #[test]
    fn forced_change_rejects_short_new_password() {
        assert_eq!(
            forced("temporal", "corta", "corta").validate(),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
    }

    #[test]
    fn forced_change_rejects_mismatched_confirmation() {
        assert_eq!(
            forced("temporal", "definitiva1", "definitiva2").validate(),
            Err(ValidationError::PasswordsDoNotMatch)
        );
    }

    #[test]
    fn forced_change_rejects_unchanged_password() {
        assert_eq!(
            forced("temporal1", "temporal1", "temporal1").validate(),
            Err(ValidationError::PasswordUnchanged)
        );
    }

    #[test]
    fn length_is_checked_before_equality_and_difference() {
        // Short, mismatched and equal to current at once: length wins
        assert_eq!(
            forced("abc", "abc", "xyz").validate(),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
        // Long enough, mismatched and equal to current: confirmation wins
        assert_eq!(
            forced("temporal1", "temporal1", "otra_cosa").validate(),
            Err(ValidationError::PasswordsDoNotMatch)
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let form = forced("temporal", "corta", "corta");
        assert_eq!(form.validate(), form.validate());
        let valid = forced("temporal", "definitiva1", "definitiva1");
        assert_eq!(valid.validate(), valid.validate());
    }

    #[test]
    fn valid_forced_change_builds_request_and_clears() {
        let mut form = forced("temporal", "definitiva1", "definitiva1");
        let request = form.validate().unwrap();
        assert_eq!(request.new_password, "definitiva1");
        assert_eq!(request.new_password_confirmation, "definitiva1");
        form.clear_passwords();
        assert_eq!(form, ForcedPasswordForm::default());
    }

    #[test]
    fn profile_password_change_uses_same_rules() {
        let form = PasswordChangeForm {
            current_password: String::new(),
            new_password: "definitiva1".to_string(),
            confirmation: "definitiva1".to_string(),
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::Required(Field::CurrentPassword))
        );
    }

    #[test]
    fn reset_requires_token_and_six_characters() {
        let mut form = ResetPasswordForm::with_token("");
        form.email = "ana@example.com".to_string();
        form.password = "123456".to_string();
        form.confirmation = "123456".to_string();
        assert_eq!(form.validate(), Err(ValidationError::Required(Field::Token)));

        form.token = "abc123".to_string();
        assert!(form.validate().is_ok());

        form.password = "12345".to_string();
        form.confirmation = "12345".to_string();
        assert_eq!(
            form.validate(),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );

        form.clear_passwords();
        assert_eq!(form.email, "ana@example.com");
        assert!(form.password.is_empty());
    }

    #[test]
    fn register_validates_in_field_order() {
        let mut form = RegisterForm {
            name: " Ana Pérez ".to_string(),
            email: "ana@example.com".to_string(),
            role: None,
            id_number: "0102030405".to_string(),
            phone: String::new(),
            password: "secreto".to_string(),
            confirmation: "secreto".to_string(),
        };
        assert_eq!(form.validate(), Err(ValidationError::Required(Field::Role)));

        form.role = Some(UserRole::Seller);
        let request = form.validate().unwrap();
        assert_eq!(request.name, "Ana Pérez");
        assert_eq!(request.phone, None);

        form.phone = "12".to_string();
        assert_eq!(form.validate(), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn profile_form_round_trips_profile_fields() {
        let profile = Profile {
            id: 1,
            name: "Carla".to_string(),
            email: "carla@example.com".to_string(),
            phone: None,
            role: "admin".to_string(),
            avatar: None,
            created_at: None,
            last_login_at: None,
        };
        let mut form = ProfileForm::from(&profile);
        assert_eq!(form.phone, "");
        form.phone = " 0991234567 ".to_string();
        let update = form.validate().unwrap();
        assert_eq!(update.phone.as_deref(), Some("0991234567"));
    }

    #[test]
    fn profile_form_ignores_avatar_changes() {
        let with_avatar = Profile {
            id: 2,
            name: "Luis".to_string(),
            email: "luis@example.com".to_string(),
            phone: Some("0987654321".to_string()),
            role: "vendedor".to_string(),
            avatar: Some("avatars/luis.png".to_string()),
            created_at: None,
            last_login_at: None,
        };
        let without_avatar = Profile {
            avatar: None,
            ..with_avatar.clone()
        };
        assert_eq!(ProfileForm::from(&with_avatar), ProfileForm::from(&without_avatar));

        let renamed = Profile {
            name: "Luis A.".to_string(),
            ..with_avatar.clone()
        };
        assert_ne!(ProfileForm::from(&with_avatar), ProfileForm::from(&renamed));
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "ana@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(ValidationError::Required(Field::Password)));
    }
}
