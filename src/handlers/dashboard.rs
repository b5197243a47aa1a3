// src/handlers/dashboard.rs

use crate::{
    common::error::AppError,
    config::AppState,
    models::{auth::User, dashboard::DashboardSummary},
    services::DashboardService,
    storage::SessionStore,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub user: Option<User>,
    pub summary: DashboardSummary,
}

pub struct DashboardPage {
    service: DashboardService,
    session: SessionStore,
}

impl DashboardPage {
    pub fn new(state: &AppState) -> Self {
        Self { service: state.dashboard_service.clone(), session: state.session.clone() }
    }

    pub async fn load(&self) -> Result<DashboardView, AppError> {
        let summary = self.service.get_summary().await?;
        Ok(DashboardView { user: self.session.get_user(), summary })
    }
}
