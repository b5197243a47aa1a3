// src/services/auth.rs

use validator::Validate;

use crate::{
    api::ApiClient,
    common::error::AppError,
    models::{
        auth::{LoginForm, LoginResponse, User, UserCreate},
        BackendEntity,
    },
    storage::SessionStore,
};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Login pelo fluxo OAuth2 "password". Guarda o token e o usuário na
    /// sessão; se a resposta não trouxer o usuário, busca em `/auth/me`.
    pub async fn login(&self, form: &LoginForm) -> Result<User, AppError> {
        form.validate()?;

        let body = self
            .api
            .post_form("/auth/token", &form.as_form(), "Falha no login")
            .await?;
        let response: LoginResponse = serde_json::from_value(body)
            .map_err(|e| AppError::Schema(format!("resposta de login: {e}")))?;

        self.session().set_token(&response.access_token)?;

        let user = match response.user {
            Some(user) => Ok(user),
            None => self.current_user().await,
        }
        .and_then(|user| self.session().set_user(&user).map(|()| user));

        // Sem usuário não há sessão utilizável: o token não fica sozinho
        let user = match user {
            Ok(user) => user,
            Err(e) => {
                self.session().clear_token()?;
                return Err(e);
            }
        };

        tracing::info!("🔑 Login de {} ({})", user.email, user.role_label());
        Ok(user)
    }

    pub async fn register(&self, new: &UserCreate) -> Result<User, AppError> {
        new.validate()?;

        let body = self
            .api
            .post("/auth/register", new, "Falha ao registrar usuário")
            .await?;
        let user = User::from_backend(body)?;

        tracing::info!("✅ Usuário {} registrado", user.email);
        Ok(user)
    }

    pub async fn current_user(&self) -> Result<User, AppError> {
        let body = self
            .api
            .get("/auth/me", "Falha ao buscar o usuário atual")
            .await?;
        User::from_backend(body)
    }

    pub fn logout(&self) -> Result<(), AppError> {
        self.session().clear_token()
    }
}
