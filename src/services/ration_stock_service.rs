// src/services/ration_stock_service.rs

use validator::Validate;

use crate::{
    api::{page_from, ApiClient, ListFilters, Page},
    common::error::AppError,
    models::{
        ration_stock::{RationStock, RationStockCreate, RationStockUpdate},
        with_id, BackendEntity,
    },
};
use super::entity;

const BASE: &str = "/ration-stock";

#[derive(Clone)]
pub struct RationStockService {
    api: ApiClient,
}

impl RationStockService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self, filters: &ListFilters) -> Result<Page<RationStock>, AppError> {
        let body = self
            .api
            .get_with_query(&format!("{BASE}/"), filters, "Falha ao buscar estoques de ração")
            .await?;
        page_from(body)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<RationStock, AppError> {
        let body = self
            .api
            .get_one(&format!("{BASE}/{id}"), "Estoque de ração não encontrado")
            .await?;
        RationStock::from_backend(body)
    }

    pub async fn create(&self, new: RationStockCreate) -> Result<RationStock, AppError> {
        new.validate()?;

        let body = self
            .api
            .post(&format!("{BASE}/"), &new, "Falha ao cadastrar estoque de ração")
            .await?;
        let created: RationStock = entity(body, "Estoque de ração não encontrado")?;

        tracing::info!("✅ Estoque '{}' cadastrado (id {})", created.name, created.id);
        Ok(created)
    }

    // O backend confere se o id da rota bate com o do corpo.
    pub async fn update(&self, id: i64, changes: RationStockUpdate) -> Result<RationStock, AppError> {
        let payload = with_id(&changes, id)?;

        let body = self
            .api
            .put(&format!("{BASE}/{id}"), &payload, "Falha ao atualizar estoque de ração")
            .await?;
        let updated = entity(body, "Estoque de ração não encontrado")?;

        tracing::info!("✅ Estoque {} atualizado", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("{BASE}/{id}"), "Falha ao excluir estoque de ração")
            .await?;
        tracing::info!("🗑️ Estoque {} excluído", id);
        Ok(())
    }
}
