// src/middleware/admin.rs

use crate::{models::route::Route, storage::SessionStore};
use super::GuardOutcome;

/// Área administrativa: sem sessão vai para o login; com sessão mas sem o
/// papel `administrador` volta para a página inicial.
pub fn admin_guard(session: &SessionStore, to: Route) -> GuardOutcome {
    if !session.check_auth() {
        return GuardOutcome::Redirect(Route::Login);
    }

    if !session.is_admin() {
        let email = session.get_user().map(|u| u.email).unwrap_or_default();
        tracing::warn!("🚫 Acesso negado a {}: usuário '{}' não é administrador", to, email);
        return GuardOutcome::Redirect(Route::LANDING);
    }

    GuardOutcome::Proceed
}
