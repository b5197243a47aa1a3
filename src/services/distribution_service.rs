// src/services/distribution_service.rs

use validator::Validate;

use crate::{
    api::{page_from, ApiClient, ListFilters, Page},
    common::error::AppError,
    models::{
        distribution::{Distribution, DistributionCreate, DistributionUpdate},
        with_id, BackendEntity,
    },
};
use super::entity;

const BASE: &str = "/distribution";

#[derive(Clone)]
pub struct DistributionService {
    api: ApiClient,
}

impl DistributionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Lista as distribuições. `include_old` traz também os registros
    /// anteriores à data de corte (só gestores enxergam).
    pub async fn get_all(&self, filters: &ListFilters) -> Result<Page<Distribution>, AppError> {
        let body = self
            .api
            .get_with_query(&format!("{BASE}/"), filters, "Falha ao buscar distribuições")
            .await?;
        page_from(body)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Distribution, AppError> {
        let body = self
            .api
            .get_one(&format!("{BASE}/{id}"), "Distribuição não encontrada")
            .await?;
        Distribution::from_backend(body)
    }

    pub async fn get_by_beneficiary_id(
        &self,
        beneficiary_id: i64,
    ) -> Result<Page<Distribution>, AppError> {
        let body = self
            .api
            .get(
                &format!("{BASE}/beneficiary/{beneficiary_id}"),
                "Falha ao buscar distribuições do beneficiário",
            )
            .await?;
        page_from(body)
    }

    pub async fn create(&self, new: DistributionCreate) -> Result<Distribution, AppError> {
        new.validate()?;

        let body = self
            .api
            .post(&format!("{BASE}/"), &new, "Falha ao registrar distribuição")
            .await?;
        let created: Distribution = entity(body, "Distribuição não encontrada")?;

        tracing::info!(
            "✅ Distribuição de {} registrada para o beneficiário {}",
            created.amount,
            created.beneficiary_id
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, changes: DistributionUpdate) -> Result<Distribution, AppError> {
        let payload = with_id(&changes, id)?;

        let body = self
            .api
            .put(&format!("{BASE}/"), &payload, "Falha ao atualizar distribuição")
            .await?;
        let updated = entity(body, "Distribuição não encontrada")?;

        tracing::info!("✅ Distribuição {} atualizada", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("{BASE}/{id}"), "Falha ao excluir distribuição")
            .await?;
        tracing::info!("🗑️ Distribuição {} excluída", id);
        Ok(())
    }
}
