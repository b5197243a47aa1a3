// src/handlers/login.rs

use crate::{
    config::AppState,
    handlers::navigation::Navigator,
    models::{auth::LoginForm, route::Route},
    services::AuthService,
};

// Resultado do envio do formulário: onde o usuário ficou e o erro a exibir
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub route: Route,
    pub error: Option<String>,
}

pub struct LoginPage {
    auth: AuthService,
    navigator: Navigator,
}

impl LoginPage {
    pub fn new(state: &AppState) -> Self {
        Self { auth: state.auth_service.clone(), navigator: state.navigator.clone() }
    }

    /// Envia o formulário. Campos vazios são barrados antes da requisição e
    /// o usuário continua no login; com sucesso vai para o dashboard.
    pub async fn submit(&self, email: &str, password: &str) -> LoginOutcome {
        let form = LoginForm::new(email.trim(), password);

        match self.auth.login(&form).await {
            Ok(_) => LoginOutcome { route: self.navigator.navigate(Route::LANDING), error: None },
            Err(e) => {
                tracing::warn!("⚠️ Login recusado: {}", e);
                LoginOutcome {
                    route: self.navigator.navigate(Route::Login),
                    error: Some(e.user_message()),
                }
            }
        }
    }

    pub fn logout(&self) -> Route {
        if let Err(e) = self.auth.logout() {
            tracing::error!("🔥 Falha ao encerrar a sessão: {}", e);
        }
        self.navigator.navigate(Route::Login)
    }
}
