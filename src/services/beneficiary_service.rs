// src/services/beneficiary_service.rs

use serde::Serialize;

use crate::{
    api::{client::encode_segment, page_from, ApiClient, ListFilters, Page},
    common::error::AppError,
    models::{
        beneficiary::{Beneficiary, BeneficiarySearchResponse, BeneficiaryUpdate, NewBeneficiary},
        BackendEntity,
    },
};
use super::entity;

const BASE: &str = "/beneficiary";

#[derive(Serialize)]
struct SearchPage {
    skip: u32,
    limit: u32,
}

#[derive(Clone)]
pub struct BeneficiaryService {
    api: ApiClient,
}

impl BeneficiaryService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self, filters: &ListFilters) -> Result<Page<Beneficiary>, AppError> {
        let body = self
            .api
            .get_with_query(&format!("{BASE}/"), filters, "Falha ao buscar beneficiários")
            .await?;
        page_from(body)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Beneficiary, AppError> {
        let body = self
            .api
            .get_one(&format!("{BASE}/{id}"), "Beneficiário não encontrado")
            .await?;
        Beneficiary::from_backend(body)
    }

    /// Cadastra um beneficiário. Endereço incompleto, nome vazio e data de
    /// nascimento inválida são recusados aqui, sem requisição.
    pub async fn create(&self, new: NewBeneficiary) -> Result<Beneficiary, AppError> {
        let payload = new.into_payload()?;

        let body = self
            .api
            .post(&format!("{BASE}/"), &payload, "Falha ao cadastrar beneficiário")
            .await?;
        let created: Beneficiary = entity(body, "Beneficiário não encontrado")?;

        tracing::info!("✅ Beneficiário {} cadastrado (id {})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, changes: BeneficiaryUpdate) -> Result<Beneficiary, AppError> {
        let payload = changes.into_payload(id)?;

        let body = self
            .api
            .put(&format!("{BASE}/"), &payload, "Falha ao atualizar beneficiário")
            .await?;
        let updated: Beneficiary = entity(body, "Beneficiário não encontrado")?;

        tracing::info!("✅ Beneficiário {} atualizado", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("{BASE}/{id}"), "Falha ao excluir beneficiário")
            .await?;
        tracing::info!("🗑️ Beneficiário {} excluído", id);
        Ok(())
    }

    pub async fn search_by_neighborhood(
        &self,
        neighborhood: &str,
        skip: u32,
        limit: u32,
    ) -> Result<Page<Beneficiary>, AppError> {
        self.search("neighborhood", neighborhood, skip, limit, "Falha ao buscar por bairro")
            .await
    }

    pub async fn search_by_street(
        &self,
        street: &str,
        skip: u32,
        limit: u32,
    ) -> Result<Page<Beneficiary>, AppError> {
        self.search("street", street, skip, limit, "Falha ao buscar por rua").await
    }

    // Nas buscas o total é o do backend (paginação), não o tamanho da página.
    async fn search(
        &self,
        kind: &str,
        term: &str,
        skip: u32,
        limit: u32,
        fallback: &str,
    ) -> Result<Page<Beneficiary>, AppError> {
        let path = format!("{BASE}/search/{kind}/{}", encode_segment(term));
        let body = self
            .api
            .get_with_query(&path, &SearchPage { skip, limit }, fallback)
            .await?;

        let response: BeneficiarySearchResponse = serde_json::from_value(body)
            .map_err(|e| AppError::Schema(format!("busca de beneficiários: {e}")))?;
        let items = response
            .beneficiaries
            .into_iter()
            .map(Beneficiary::from_backend)
            .collect::<Result<Vec<_>, _>>()?;

        let total = usize::try_from(response.total).unwrap_or(items.len());
        Ok(Page { items, total })
    }
}
