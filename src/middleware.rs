// src/middleware.rs
//
// Guardas consultados antes de cada navegação.

pub mod admin;
pub mod auth;

pub use admin::admin_guard;
pub use auth::auth_guard;

use crate::models::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect(Route),
}
