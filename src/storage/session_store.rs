// src/storage/session_store.rs

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    common::error::AppError,
    models::{auth::User, session::Session},
};
use super::{DurableStorage, ACCESS_TOKEN_KEY, CURRENT_USER_KEY, LEGACY_TOKEN_KEY};

#[derive(Debug, Default)]
struct SessionState {
    hydrated: bool,
    token: Option<String>,
    user: Option<User>,
}

/// Contexto de sessão compartilhado por serviços e guardas de rota.
///
/// Guarda o token bearer e o usuário atual em memória e espelha cada mudança no
/// armazenamento durável, para que um novo processo (ou um reload) recupere a
/// sessão. Clonar é barato: todos os clones veem o mesmo estado.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn DurableStorage>,
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self { storage, state: Arc::new(RwLock::new(SessionState::default())) }
    }

    /// Hidrata a sessão a partir do armazenamento. Chamar é opcional: o
    /// primeiro acesso faz o mesmo.
    pub fn init(&self) {
        let token = self.read_token();
        let user = self.read_user();

        let mut state = self.state.write();
        state.token = token;
        state.user = user;
        state.hydrated = true;
        tracing::debug!("Sessão hidratada (autenticado: {})", state.token.is_some());
    }

    /// Descarta o estado em memória. O armazenamento não é tocado; o próximo
    /// acesso hidrata de novo.
    pub fn reset(&self) {
        *self.state.write() = SessionState::default();
    }

    fn ensure_hydrated(&self) {
        if !self.state.read().hydrated {
            self.init();
        }
    }

    fn read_token(&self) -> Option<String> {
        for key in [ACCESS_TOKEN_KEY, LEGACY_TOKEN_KEY] {
            match self.storage.get_item(key) {
                Ok(Some(token)) if !token.is_empty() => return Some(token),
                Ok(_) => {}
                Err(e) => tracing::warn!("⚠️ Falha ao ler '{}' do armazenamento: {}", key, e),
            }
        }
        None
    }

    fn read_user(&self) -> Option<User> {
        let raw = match self.storage.get_item(CURRENT_USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("⚠️ Falha ao ler o usuário do armazenamento: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("⚠️ Usuário salvo está corrompido ({}); removendo.", e);
                if let Err(e) = self.storage.remove_item(CURRENT_USER_KEY) {
                    tracing::warn!("⚠️ Não foi possível remover o usuário corrompido: {}", e);
                }
                None
            }
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.ensure_hydrated();
        if let Some(token) = self.state.read().token.clone() {
            return Some(token);
        }

        // Outro processo pode ter feito login depois da hidratação
        let token = self.read_token()?;
        self.state.write().token = Some(token.clone());
        Some(token)
    }

    pub fn set_token(&self, token: &str) -> Result<(), AppError> {
        self.storage.set_item(ACCESS_TOKEN_KEY, token)?;

        let mut state = self.state.write();
        state.token = Some(token.to_string());
        state.hydrated = true;
        Ok(())
    }

    pub fn get_user(&self) -> Option<User> {
        self.ensure_hydrated();
        if let Some(user) = self.state.read().user.clone() {
            return Some(user);
        }

        let user = self.read_user()?;
        self.state.write().user = Some(user.clone());
        Some(user)
    }

    pub fn set_user(&self, user: &User) -> Result<(), AppError> {
        let raw = serde_json::to_string(user)?;
        self.storage.set_item(CURRENT_USER_KEY, &raw)?;

        let mut state = self.state.write();
        state.user = Some(user.clone());
        state.hydrated = true;
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.get_user().is_some_and(|user| user.is_admin())
    }

    pub fn is_authenticated(&self) -> bool {
        self.ensure_hydrated();
        self.state.read().token.is_some()
    }

    /// Logout: apaga token e usuário da memória e do armazenamento.
    ///
    /// A memória é limpa mesmo se o armazenamento falhar; o primeiro erro é
    /// devolvido depois de tentar todas as chaves.
    pub fn clear_token(&self) -> Result<(), AppError> {
        {
            let mut state = self.state.write();
            state.token = None;
            state.user = None;
            state.hydrated = true;
        }

        let mut first_error = None;
        for key in [ACCESS_TOKEN_KEY, LEGACY_TOKEN_KEY, CURRENT_USER_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                tracing::error!("🔥 Falha ao remover '{}' do armazenamento: {}", key, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!("👋 Sessão encerrada.");
                Ok(())
            }
        }
    }

    /// Recalcula o estado de autenticação a partir do token guardado no
    /// armazenamento e recarrega o usuário junto.
    pub fn check_auth(&self) -> bool {
        let token = self.read_token();
        let user = if token.is_some() { self.read_user() } else { None };

        let mut state = self.state.write();
        state.hydrated = true;
        state.token = token;
        state.user = user;
        state.token.is_some()
    }

    /// Valor do cabeçalho `Authorization`, se houver token.
    pub fn auth_header(&self) -> Option<String> {
        self.get_token().map(|token| format!("Bearer {token}"))
    }

    pub fn snapshot(&self) -> Session {
        self.ensure_hydrated();
        let state = self.state.read();
        Session {
            token: state.token.clone(),
            is_authenticated: state.token.is_some(),
            current_user: state.user.clone(),
        }
    }
}
