// src/handlers/beneficiaries.rs

use serde::Serialize;

use crate::{
    api::ListFilters,
    common::error::AppError,
    config::AppState,
    models::beneficiary::Beneficiary,
    services::BeneficiaryService,
};

// Uma linha da tabela de beneficiários, já formatada para exibição
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeneficiaryRow {
    pub id: i64,
    pub name: String,
    pub document: String,
    pub address: String,
    pub contact: String,
    pub monthly_limit: String,
    pub birth_date: String,
}

impl From<&Beneficiary> for BeneficiaryRow {
    fn from(b: &Beneficiary) -> Self {
        Self {
            id: b.id,
            name: b.name.clone(),
            document: b.document.clone(),
            address: b.formatted_address(),
            contact: b.contact.clone(),
            // sem arredondar: 7.25 aparece como 7.25
            monthly_limit: b.monthly_limit.to_string(),
            birth_date: b
                .birth_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeneficiaryTable {
    pub rows: Vec<BeneficiaryRow>,
    pub total: usize,
}

pub struct BeneficiariesPage {
    service: BeneficiaryService,
}

impl BeneficiariesPage {
    pub fn new(state: &AppState) -> Self {
        Self { service: state.beneficiary_service.clone() }
    }

    pub async fn load(&self) -> Result<BeneficiaryTable, AppError> {
        self.load_with(&ListFilters::default()).await
    }

    pub async fn load_with(&self, filters: &ListFilters) -> Result<BeneficiaryTable, AppError> {
        let page = self.service.get_all(filters).await?;
        Ok(BeneficiaryTable {
            rows: page.iter().map(BeneficiaryRow::from).collect(),
            total: page.total,
        })
    }

    /// Busca pelo campo de pesquisa: primeiro por bairro, depois por rua.
    pub async fn search(&self, term: &str) -> Result<BeneficiaryTable, AppError> {
        let term = term.trim();
        if term.is_empty() {
            return self.load().await;
        }

        let mut page = self.service.search_by_neighborhood(term, 0, 100).await?;
        if page.is_empty() {
            page = self.service.search_by_street(term, 0, 100).await?;
        }
        Ok(BeneficiaryTable {
            rows: page.iter().map(BeneficiaryRow::from).collect(),
            total: page.total,
        })
    }
}
