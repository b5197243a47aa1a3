// src/services/dashboard_service.rs

use serde::de::DeserializeOwned;

use crate::{
    api::ApiClient,
    common::error::AppError,
    models::dashboard::{DashboardSummary, MonthlyTotal, StockTotal},
};

const BASE: &str = "/dashboard";

#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T, AppError> {
        let body = self.api.get(&format!("{BASE}/{path}"), fallback).await?;
        serde_json::from_value(body).map_err(|e| AppError::Schema(format!("{path}: {e}")))
    }

    pub async fn total_inputs_month(&self) -> Result<MonthlyTotal, AppError> {
        self.fetch("total-inputs-month", "Falha ao buscar o total de entradas do mês")
            .await
    }

    pub async fn total_distributions_month(&self) -> Result<MonthlyTotal, AppError> {
        self.fetch(
            "total-distributions-month",
            "Falha ao buscar o total de distribuições do mês",
        )
        .await
    }

    pub async fn current_total_stock(&self) -> Result<StockTotal, AppError> {
        self.fetch("current-total-stock", "Falha ao buscar o estoque atual")
            .await
    }

    /// Os três totais do topo do dashboard, buscados em paralelo.
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let (inputs_month, distributions_month, stock) = tokio::try_join!(
            self.total_inputs_month(),
            self.total_distributions_month(),
            self.current_total_stock(),
        )?;
        Ok(DashboardSummary { inputs_month, distributions_month, stock })
    }
}
