use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SessionUser;

/// Profile of the authenticated user as returned by `GET /profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "rol")]
    pub role: String,
    /// Public URL of the avatar image.
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "ultimo_acceso", default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Identity record to mirror after the profile changed.
    ///
    /// The forced-change flag is not part of the profile payload, so the
    /// caller passes the value it already knows.
    #[must_use]
    pub fn to_session_user(&self, must_change_password: bool) -> SessionUser {
        SessionUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            avatar: self.avatar.clone(),
            must_change_password,
        }
    }
}

/// Text fields sent as multipart parts to `POST /profile/update`.
///
/// The avatar file, when present, is attached separately by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    /// Multipart field names and values, skipping an empty phone.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("nombre", self.name.clone()), ("email", self.email.clone())];
        if let Some(phone) = self.phone.as_ref().filter(|phone| !phone.trim().is_empty()) {
            fields.push(("telefono", phone.clone()));
        }
        fields
    }
}

/// Body of `POST /profile/password`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_maps_to_session_user() {
        let profile: Profile = serde_json::from_value(json!({
            "id": 12,
            "nombre": "Carla Ruiz",
            "email": "carla@example.com",
            "telefono": "0999999999",
            "rol": "vendedor",
            "avatar": "https://cdn.example.com/a/12.png",
            "created_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        let session = profile.to_session_user(false);
        assert_eq!(session.name, "Carla Ruiz");
        assert_eq!(session.email, "carla@example.com");
        assert_eq!(session.avatar.as_deref(), Some("https://cdn.example.com/a/12.png"));
        assert_eq!(session.role, "vendedor");
        assert!(profile.last_login_at.is_none());
    }

    #[test]
    fn form_fields_omit_blank_phone() {
        let update = ProfileUpdate {
            name: "Carla".to_string(),
            email: "carla@example.com".to_string(),
            phone: Some("  ".to_string()),
        };
        let fields = update.form_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("nombre", "Carla".to_string()));

        let with_phone = ProfileUpdate {
            phone: Some("0987654321".to_string()),
            ..update
        };
        assert_eq!(with_phone.form_fields()[2], ("telefono", "0987654321".to_string()));
    }
}
