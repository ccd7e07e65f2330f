pub mod app_state;
pub mod forms;
pub mod request_status;
pub mod session;
pub mod toast;
