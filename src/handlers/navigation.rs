// src/handlers/navigation.rs

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    common::error::AppError,
    middleware::{admin_guard, auth_guard, GuardOutcome},
    models::route::Route,
    storage::SessionStore,
};

// Login -> Dashboard é a cadeia mais longa possível; o limite só evita laço.
const MAX_REDIRECTS: usize = 4;

/// Roteador sem interface: aplica as guardas a cada navegação e guarda a
/// rota atual. Clones compartilham a rota atual.
#[derive(Clone)]
pub struct Navigator {
    session: SessionStore,
    current: Arc<RwLock<Route>>,
}

impl Navigator {
    pub fn new(session: SessionStore) -> Self {
        Self { session, current: Arc::new(RwLock::new(Route::Login)) }
    }

    pub fn current(&self) -> Route {
        *self.current.read()
    }

    fn check(&self, to: Route) -> GuardOutcome {
        match auth_guard(&self.session, to) {
            GuardOutcome::Proceed if to.requires_admin() => admin_guard(&self.session, to),
            outcome => outcome,
        }
    }

    /// Rota onde a navegação para `to` termina depois dos redirecionamentos.
    pub fn resolve(&self, to: Route) -> Route {
        let mut target = to;
        for _ in 0..MAX_REDIRECTS {
            match self.check(target) {
                GuardOutcome::Proceed => return target,
                GuardOutcome::Redirect(next) => {
                    tracing::debug!("↪️ {} redirecionado para {}", target, next);
                    target = next;
                }
            }
        }
        tracing::warn!("⚠️ Redirecionamentos demais a partir de {}; indo para o login", to);
        Route::Login
    }

    pub fn navigate(&self, to: Route) -> Route {
        let landed = self.resolve(to);
        *self.current.write() = landed;
        landed
    }

    pub fn navigate_path(&self, path: &str) -> Result<Route, AppError> {
        let route = Route::from_path(path)
            .ok_or_else(|| AppError::NotFound(format!("Página {path} não encontrada")))?;
        Ok(self.navigate(route))
    }
}
