pub mod envelope;
pub mod errors;
pub mod inventory;
pub mod profile;
pub mod sales;
pub mod user;

pub use envelope::{ApiEnvelope, EnvelopeError};
pub use errors::ErrorResponse;
pub use inventory::{DashboardSummary, KardexMovement, LotSummary, MovementKind, Product};
pub use profile::{PasswordChangeRequest, Profile, ProfileUpdate};
pub use sales::{DailyReport, HourlySales, PaymentMethodTotal, ReportFormat, TopProduct};
pub use user::{
    ForcedPasswordChangeRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    RegisterRequest, ResetPasswordRequest, SessionUser, UserRole,
};
