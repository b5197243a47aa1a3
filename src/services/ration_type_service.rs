// src/services/ration_type_service.rs

use validator::Validate;

use crate::{
    api::{page_from, ApiClient, ListFilters, Page},
    common::error::AppError,
    models::{
        ration_type::{RationType, RationTypeCreate, RationTypeUpdate},
        BackendEntity,
    },
};
use super::entity;

const BASE: &str = "/ration_type";

#[derive(Clone)]
pub struct RationTypeService {
    api: ApiClient,
}

impl RationTypeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self, filters: &ListFilters) -> Result<Page<RationType>, AppError> {
        let body = self
            .api
            .get_with_query(&format!("{BASE}/"), filters, "Falha ao buscar tipos de ração")
            .await?;
        page_from(body)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<RationType, AppError> {
        let body = self
            .api
            .get_one(&format!("{BASE}/{id}"), "Tipo de ração não encontrado")
            .await?;
        RationType::from_backend(body)
    }

    pub async fn create(&self, new: RationTypeCreate) -> Result<RationType, AppError> {
        new.validate()?;

        let body = self
            .api
            .post(&format!("{BASE}/"), &new, "Falha ao cadastrar tipo de ração")
            .await?;
        let created: RationType = entity(body, "Tipo de ração não encontrado")?;

        tracing::info!("✅ Tipo de ração '{}' cadastrado", created.name);
        Ok(created)
    }

    // Aqui o id vai só na rota
    pub async fn update(&self, id: i64, changes: RationTypeUpdate) -> Result<RationType, AppError> {
        let body = self
            .api
            .put(&format!("{BASE}/{id}"), &changes, "Falha ao atualizar tipo de ração")
            .await?;
        entity(body, "Tipo de ração não encontrado")
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("{BASE}/{id}"), "Falha ao excluir tipo de ração")
            .await?;
        tracing::info!("🗑️ Tipo de ração {} excluído", id);
        Ok(())
    }
}
