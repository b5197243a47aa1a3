// src/services/ration_input_service.rs

use validator::Validate;

use crate::{
    api::{page_from, ApiClient, ListFilters, Page},
    common::error::AppError,
    models::{
        ration_input::{RationInput, RationInputCreate, RationInputUpdate},
        with_id, BackendEntity,
    },
};
use super::entity;

const BASE: &str = "/ration-input";

#[derive(Clone)]
pub struct RationInputService {
    api: ApiClient,
}

impl RationInputService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self, filters: &ListFilters) -> Result<Page<RationInput>, AppError> {
        let body = self
            .api
            .get_with_query(&format!("{BASE}/"), filters, "Falha ao buscar entradas de ração")
            .await?;
        page_from(body)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<RationInput, AppError> {
        let body = self
            .api
            .get_one(&format!("{BASE}/{id}"), "Registro de entrada não encontrado")
            .await?;
        RationInput::from_backend(body)
    }

    pub async fn get_by_ration_stock_id(&self, stock_id: i64) -> Result<Page<RationInput>, AppError> {
        let body = self
            .api
            .get(
                &format!("{BASE}/ration-stock/{stock_id}"),
                "Falha ao buscar entradas do estoque",
            )
            .await?;
        page_from(body)
    }

    pub async fn create(&self, new: RationInputCreate) -> Result<RationInput, AppError> {
        new.validate()?;

        let body = self
            .api
            .post(&format!("{BASE}/"), &new, "Falha ao registrar entrada de ração")
            .await?;
        let created: RationInput = entity(body, "Registro de entrada não encontrado")?;

        tracing::info!(
            "✅ Entrada de {} registrada no estoque {}",
            created.amount,
            created.ration_stock_id
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, changes: RationInputUpdate) -> Result<RationInput, AppError> {
        let payload = with_id(&changes, id)?;

        let body = self
            .api
            .put(&format!("{BASE}/{id}"), &payload, "Falha ao atualizar entrada de ração")
            .await?;
        let updated = entity(body, "Registro de entrada não encontrado")?;

        tracing::info!("✅ Entrada {} atualizada", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("{BASE}/{id}"), "Falha ao excluir entrada de ração")
            .await?;
        tracing::info!("🗑️ Entrada {} excluída", id);
        Ok(())
    }
}
