use crate::config::FrontendConfig;
use chrono::NaiveDate;
use gloo_storage::{LocalStorage, Storage};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    ApiEnvelope, DailyReport, EnvelopeError, ErrorResponse, ForcedPasswordChangeRequest,
    ForgotPasswordRequest, KardexMovement, LoginRequest, LoginResponse, LotSummary,
    PasswordChangeRequest, Product, Profile, ProfileUpdate, RegisterRequest, ReportFormat,
    ResetPasswordRequest, SessionUser,
};
use std::cell::OnceCell;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// `localStorage` key holding the bearer token.
pub const TOKEN_KEY: &str = "inventario.token";

thread_local! {
    static SHARED_CLIENT: OnceCell<InventarioClient> = const { OnceCell::new() };
}

/// Failure of a backend call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Transport(String),
    /// The backend answered 401
    #[error("unauthorized")]
    Unauthorized(Option<String>),
    /// The backend answered with a failure status or `success: false`
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Backend { status: u16, message: Option<String> },
    /// The response body was not what the endpoint promises
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let message = ErrorResponse::parse(body).and_then(|error| error.display_message());
        if status == StatusCode::UNAUTHORIZED.as_u16() {
            Self::Unauthorized(message)
        } else {
            Self::Backend { status, message }
        }
    }

    /// Message supplied by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(message) | Self::Backend { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Text to show the user: the backend message when there is one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_status_body(status.as_u16(), "");
        }
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected(message) => Self::Backend {
                status: StatusCode::OK.as_u16(),
                message,
            },
            EnvelopeError::MissingData => Self::Decode(err.to_string()),
        }
    }
}

/// Parse a response body as an [`ApiEnvelope`].
///
/// # Errors
/// [`ApiError::Decode`] when the body does not match.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiEnvelope<T>, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// An avatar picked by the user, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// API client for the inventory backend.
#[derive(Clone, Debug)]
pub struct InventarioClient {
    base_url: String,
    client: Client,
    token: Arc<Mutex<Option<String>>>,
}

impl InventarioClient {
    /// Create a client for `base_url`, picking up a stored token.
    pub fn new(base_url: &str) -> Self {
        Self::with_token(base_url, LocalStorage::get::<String>(TOKEN_KEY).ok())
    }

    /// Create a client with an explicit token and no storage access.
    pub fn with_token(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            token: Arc::new(Mutex::new(token)),
        }
    }

    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(FrontendConfig::new().api_base_url()))
                .clone()
        })
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Replace the bearer token and persist it.
    pub fn set_token(&self, token: Option<String>) {
        match &token {
            Some(value) => {
                if let Err(err) = LocalStorage::set(TOKEN_KEY, value) {
                    log::warn!("could not persist token: {err}");
                }
            }
            None => LocalStorage::delete(TOKEN_KEY),
        }
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }

    pub fn current_token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn has_token(&self) -> bool {
        self.current_token().is_some()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/json");
        match self.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status_body(status.as_u16(), &body);
        log::warn!("request failed: {error}");
        Err(error)
    }

    async fn envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let body = self.send(request).await?.text().await?;
        decode_envelope(&body)
    }

    async fn data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        Ok(self.envelope::<T>(request).await?.into_data()?)
    }

    async fn ack(&self, request: RequestBuilder) -> Result<Option<String>, ApiError> {
        Ok(self
            .envelope::<serde_json::Value>(request)
            .await?
            .into_ack()?)
    }

    /// Authenticate and keep the returned token.
    pub async fn login(&self, payload: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.api_url("auth/login");
        let body: LoginResponse = self.data(self.client.post(url).json(payload)).await?;
        self.set_token(Some(body.token.clone()));
        Ok(body)
    }

    /// Revoke the token. The local token is dropped even if the call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.api_url("auth/logout");
        let result = self.ack(self.client.post(url)).await.map(|_| ());
        self.set_token(None);
        result
    }

    /// Replace a temporary password; returns the refreshed user record.
    pub async fn forced_password_change(
        &self,
        payload: &ForcedPasswordChangeRequest,
    ) -> Result<SessionUser, ApiError> {
        let url = self.api_url("auth/cambiar-clave-obligatoria");
        self.data(self.client.post(url).json(payload)).await
    }

    pub async fn forgot_password(
        &self,
        payload: &ForgotPasswordRequest,
    ) -> Result<Option<String>, ApiError> {
        let url = self.api_url("auth/forgot-password");
        self.ack(self.client.post(url).json(payload)).await
    }

    pub async fn reset_password(
        &self,
        payload: &ResetPasswordRequest,
    ) -> Result<Option<String>, ApiError> {
        let url = self.api_url("auth/reset-password");
        self.ack(self.client.post(url).json(payload)).await
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<Option<String>, ApiError> {
        let url = self.api_url("auth/register");
        self.ack(self.client.post(url).json(payload)).await
    }

    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        let url = self.api_url("profile");
        self.data(self.client.get(url)).await
    }

    /// Save identity fields and, optionally, a new avatar.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        avatar: Option<AvatarUpload>,
    ) -> Result<Profile, ApiError> {
        let url = self.api_url("profile/update");
        let mut form = Form::new();
        for (name, value) in update.form_fields() {
            form = form.text(name, value);
        }
        if let Some(avatar) = avatar {
            let part = Part::bytes(avatar.bytes)
                .file_name(avatar.file_name)
                .mime_str(&avatar.mime_type)?;
            form = form.part("avatar", part);
        }
        self.data(self.client.post(url).multipart(form)).await
    }

    pub async fn change_password(
        &self,
        payload: &PasswordChangeRequest,
    ) -> Result<Option<String>, ApiError> {
        let url = self.api_url("profile/password");
        self.ack(self.client.post(url).json(payload)).await
    }

    pub async fn delete_avatar(&self) -> Result<Option<String>, ApiError> {
        let url = self.api_url("profile/avatar");
        self.ack(self.client.delete(url)).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.api_url("productos");
        self.data(self.client.get(url)).await
    }

    pub async fn lots_summary(&self) -> Result<LotSummary, ApiError> {
        let url = self.api_url("lotes/resumen");
        self.data(self.client.get(url)).await
    }

    pub async fn kardex(&self) -> Result<Vec<KardexMovement>, ApiError> {
        let url = self.api_url("kardex");
        self.data(self.client.get(url)).await
    }

    /// Aggregated sales for one day.
    pub async fn daily_report_data(&self, date: NaiveDate) -> Result<DailyReport, ApiError> {
        let url = self.api_url("sales/report/daily/data");
        let date = date.format("%Y-%m-%d").to_string();
        self.data(self.client.get(url).query(&[("date", date)])).await
    }

    /// Printable version of the daily report.
    pub async fn daily_report_document(
        &self,
        date: NaiveDate,
        format: ReportFormat,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.api_url("sales/report/daily");
        let date = date.format("%Y-%m-%d").to_string();
        let request = self
            .client
            .get(url)
            .query(&[("date", date.as_str()), ("format", format.as_str())]);
        let response = self.send(request).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
