// src/services/user_service.rs

use validator::Validate;

use crate::{
    api::{page_from, ApiClient, ListFilters, Page},
    common::error::AppError,
    models::{
        auth::{User, UserCreate, UserUpdate},
        BackendEntity,
    },
};
use super::entity;

const BASE: &str = "/users";

// Administração de usuários (rota restrita a administradores no cliente)
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self, filters: &ListFilters) -> Result<Page<User>, AppError> {
        let body = self
            .api
            .get_with_query(&format!("{BASE}/"), filters, "Falha ao buscar usuários")
            .await?;
        page_from(body)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User, AppError> {
        let body = self
            .api
            .get_one(&format!("{BASE}/{id}"), "Usuário não encontrado")
            .await?;
        User::from_backend(body)
    }

    pub async fn create(&self, new: UserCreate) -> Result<User, AppError> {
        new.validate()?;

        let body = self
            .api
            .post(&format!("{BASE}/"), &new, "Falha ao criar usuário")
            .await?;
        let created: User = entity(body, "Usuário não encontrado")?;

        tracing::info!("✅ Usuário {} criado ({})", created.email, created.role_label());
        Ok(created)
    }

    pub async fn update(&self, id: i64, changes: UserUpdate) -> Result<User, AppError> {
        changes.validate()?;

        let body = self
            .api
            .put(&format!("{BASE}/{id}"), &changes, "Falha ao atualizar usuário")
            .await?;
        let updated: User = entity(body, "Usuário não encontrado")?;

        // Se o usuário editado é o da sessão, mantém o cache em dia
        let session = self.api.session();
        if session.get_user().is_some_and(|current| current.id == updated.id) {
            session.set_user(&updated)?;
        }

        tracing::info!("✅ Usuário {} atualizado", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("{BASE}/{id}"), "Falha ao excluir usuário")
            .await?;
        tracing::info!("🗑️ Usuário {} excluído", id);
        Ok(())
    }
}
