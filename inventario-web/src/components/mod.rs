pub(crate) mod auth_card;
pub(crate) mod avatar;
pub(crate) mod bar_chart;
pub(crate) mod form_alert;
pub(crate) mod header_nav_item;
pub(crate) mod language_selector;
pub(crate) mod language_selector_button;
pub(crate) mod load_error;
pub(crate) mod loading;
pub(crate) mod stat_card;
pub(crate) mod text_field;
pub(crate) mod theme_switcher;
pub(crate) mod toast_host;
pub(crate) mod user_dropdown;

// Re-export components for convenience
pub use auth_card::AuthCard;
pub use avatar::Avatar;
pub use bar_chart::BarChart;
pub use form_alert::FormAlert;
pub use load_error::LoadError;
pub use loading::Loading;
pub use stat_card::StatCard;
pub use text_field::{TextField, bind};
pub use toast_host::ToastHost;
