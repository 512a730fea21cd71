//! HTML template rendering handlers for the web dashboard.

mod dashboard;
mod login;

pub use dashboard::dashboard_handler;
pub use login::login_handler;
