// src/models/route.rs

use std::fmt;

/// Rotas da aplicação conhecidas pelos guardas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Beneficiaries,
    Distributions,
    Inputs,
    RationStock,
    Users,
}

impl Route {
    /// Página padrão depois do login.
    pub const LANDING: Route = Route::Dashboard;

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Beneficiaries => "/beneficiaries",
            Route::Distributions => "/distributions",
            Route::Inputs => "/inputs",
            Route::RationStock => "/ration-stock",
            Route::Users => "/users",
        }
    }

    /// `/` redireciona para o login, como na configuração de rotas do app.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/login" => Some(Route::Login),
            "/dashboard" => Some(Route::Dashboard),
            "/beneficiaries" => Some(Route::Beneficiaries),
            "/distributions" => Some(Route::Distributions),
            "/inputs" => Some(Route::Inputs),
            "/ration-stock" => Some(Route::RationStock),
            "/users" => Some(Route::Users),
            _ => None,
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Users)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
