use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Role assignments known to the client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "vendedor")]
    Seller,
    #[serde(rename = "bodeguero")]
    Warehouse,
}

impl UserRole {
    /// Every role offered by the registration form, in display order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Seller, Self::Warehouse];

    /// Return the canonical string representation expected by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Seller => "vendedor",
            Self::Warehouse => "bodeguero",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "admin" => Ok(Self::Admin),
            "vendedor" => Ok(Self::Seller),
            "bodeguero" => Ok(Self::Warehouse),
            _ => Err("unknown user role"),
        }
    }
}

/// Identity record returned by the auth endpoints and mirrored in local
/// storage so the navigation bar can render without a round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    /// Raw role string. Kept as text so unknown roles survive a round trip.
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "debe_cambiar_clave", default)]
    pub must_change_password: bool,
}

impl SessionUser {
    /// Parsed role, when it is one the client knows about.
    #[must_use]
    pub fn known_role(&self) -> Option<UserRole> {
        self.role.parse().ok()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.known_role() == Some(UserRole::Admin)
    }

    /// Initials used by the avatar placeholder.
    #[must_use]
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

/// Credentials for `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    pub user: SessionUser,
}

/// Body of `/auth/cambiar-clave-obligatoria`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForcedPasswordChangeRequest {
    #[serde(rename = "clave_actual")]
    pub current_password: String,
    #[serde(rename = "nueva_clave")]
    pub new_password: String,
    #[serde(rename = "nueva_clave_confirmation")]
    pub new_password_confirmation: String,
}

/// Body of `/auth/forgot-password`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of `/auth/reset-password`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResetPasswordRequest {
    /// Token received in the reset e-mail.
    pub token: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Body of `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: UserRole,
    /// National identity document number.
    #[serde(rename = "cedula")]
    pub id_number: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub password_confirmation: String,
}
