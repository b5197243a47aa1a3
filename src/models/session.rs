// src/models/session.rs

use serde::Serialize;

use crate::models::auth::User;

/// Fotografia do estado da sessão. `is_authenticated == token.is_some()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub current_user: Option<User>,
}
