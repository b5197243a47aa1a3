// src/middleware/auth.rs

use crate::{models::route::Route, storage::SessionStore};
use super::GuardOutcome;

/// Exige login em toda rota, menos no próprio login. Quem já está autenticado
/// e abre o login vai para a página inicial.
pub fn auth_guard(session: &SessionStore, to: Route) -> GuardOutcome {
    let authenticated = session.check_auth();

    match (to, authenticated) {
        (Route::Login, true) => GuardOutcome::Redirect(Route::LANDING),
        (Route::Login, false) => GuardOutcome::Proceed,
        (_, false) => {
            tracing::debug!("Acesso a {} sem sessão; redirecionando para o login", to);
            GuardOutcome::Redirect(Route::Login)
        }
        (_, true) => GuardOutcome::Proceed,
    }
}
