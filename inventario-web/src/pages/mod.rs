mod daily_report;
mod dashboard;
mod error;
mod forced_password_change;
mod forgot_password;
mod login;
mod profile;
mod register;
mod reset_password;

pub use daily_report::DailyReportPage;
pub use dashboard::DashboardPage;
pub use error::ErrorPage;
pub use forced_password_change::ForcedPasswordChangePage;
pub use forgot_password::ForgotPasswordPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
pub use reset_password::ResetPasswordPage;
