use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error body returned by the backend on non-2xx responses.
///
/// Validation failures carry a per-field map in `errors`; everything else
/// only fills `message`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// The main error message
    #[serde(default)]
    pub message: Option<String>,
    /// Field name to list of messages for that field
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorResponse {
    /// Creates a new error response with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: BTreeMap::new(),
        }
    }

    /// Parses an error body, returning `None` when the text is not JSON or
    /// carries nothing displayable.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        parsed.display_message().map(|_| parsed)
    }

    /// The message shown to the user: `message` when present and non-blank,
    /// otherwise the first field error in key order.
    #[must_use]
    pub fn display_message(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref().map(str::trim)
            && !message.is_empty()
        {
            return Some(message.to_string());
        }
        self.errors
            .values()
            .flat_map(|messages| messages.iter())
            .map(|message| message.trim())
            .find(|message| !message.is_empty())
            .map(ToString::to_string)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.display_message() {
            Some(message) => f.write_str(&message),
            None => f.write_str("unknown error"),
        }
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_wins_over_field_errors() {
        let body = r#"{"message":"Credenciales inválidas","errors":{"email":["no existe"]}}"#;
        let error = ErrorResponse::parse(body).unwrap();
        assert_eq!(error.display_message().as_deref(), Some("Credenciales inválidas"));
        assert_eq!(error.errors["email"], vec!["no existe".to_string()]);
    }

    #[test]
    fn falls_back_to_first_field_error() {
        let body = r#"{"message":"  ","errors":{"password":["muy corta"],"email":["ya registrado"]}}"#;
        let error = ErrorResponse::parse(body).unwrap();
        // BTreeMap ordering: "email" sorts before "password"
        assert_eq!(error.display_message().as_deref(), Some("ya registrado"));
    }

    #[test]
    fn non_json_or_empty_bodies_are_not_displayable() {
        assert!(ErrorResponse::parse("<html>502</html>").is_none());
        assert!(ErrorResponse::parse("{}").is_none());
        assert!(ErrorResponse::parse(r#"{"errors":{"email":[]}}"#).is_none());
    }

    #[test]
    fn display_uses_message() {
        assert_eq!(ErrorResponse::new("Sin stock").to_string(), "Sin stock");
        assert_eq!(ErrorResponse::default().to_string(), "unknown error");
    }
}
