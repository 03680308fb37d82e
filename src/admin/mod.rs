//! Admin response viewer. Fetches a stored quiz response behind hashed
//! credentials and tracks what the viewer should display.

pub mod auth;
pub mod record;
pub mod viewer;

pub use auth::{ADMIN_TOKEN_PARAM, AdminClient, AdminCredentials};
pub use record::{AdminRecord, UserInput};
pub use viewer::{AdminView, AdminViewer};
