//! The `{ success, data, message }` wrapper every endpoint responds with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::ErrorResponse;

/// Response envelope used by every JSON endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    /// Whether the backend considers the operation successful.
    pub success: bool,
    /// Payload, absent on failures and on some acknowledgements.
    pub data: Option<T>,
    /// Human readable status message.
    #[serde(default)]
    pub message: Option<String>,
    /// Validation errors keyed by field.
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Why an envelope could not be turned into its payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// `success` was false. Carries the displayable message when there is one.
    #[error("backend rejected the request: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
    /// `success` was true but `data` was missing.
    #[error("response is missing its data payload")]
    MissingData,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope wrapping `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: BTreeMap::new(),
        }
    }

    /// Extract the payload, rejecting failed or empty envelopes.
    ///
    /// # Errors
    /// [`EnvelopeError::Rejected`] when `success` is false,
    /// [`EnvelopeError::MissingData`] when there is no payload.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected(self.failure_message()));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }

    /// Accept the envelope without requiring a payload, returning its message.
    ///
    /// # Errors
    /// [`EnvelopeError::Rejected`] when `success` is false.
    pub fn into_ack(self) -> Result<Option<String>, EnvelopeError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(EnvelopeError::Rejected(self.failure_message()))
        }
    }

    fn failure_message(&self) -> Option<String> {
        ErrorResponse {
            message: self.message.clone(),
            errors: self.errors.clone(),
        }
        .display_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_yields_data() {
        let envelope: ApiEnvelope<Vec<u32>> =
            serde_json::from_value(json!({"success": true, "data": [1, 2, 3]})).unwrap();
        assert_eq!(envelope.into_data().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn failed_envelope_surfaces_message() {
        let envelope: ApiEnvelope<()> = serde_json::from_value(
            json!({"success": false, "message": "La clave actual es incorrecta"}),
        )
        .unwrap();
        assert_eq!(
            envelope.into_data(),
            Err(EnvelopeError::Rejected(Some(
                "La clave actual es incorrecta".to_string()
            )))
        );
    }

    #[test]
    fn failed_envelope_without_message_uses_field_errors() {
        let envelope: ApiEnvelope<()> = serde_json::from_value(
            json!({"success": false, "errors": {"email": ["El correo ya existe"]}}),
        )
        .unwrap();
        assert_eq!(
            envelope.into_ack(),
            Err(EnvelopeError::Rejected(Some("El correo ya existe".to_string())))
        );
    }

    #[test]
    fn success_without_data_is_an_error_only_when_data_is_required() {
        let envelope: ApiEnvelope<u32> =
            serde_json::from_value(json!({"success": true, "message": "Avatar eliminado"}))
                .unwrap();
        assert_eq!(envelope.clone().into_data(), Err(EnvelopeError::MissingData));
        assert_eq!(envelope.into_ack(), Ok(Some("Avatar eliminado".to_string())));
    }
}
