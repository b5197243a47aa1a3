// src/services.rs

pub mod auth;
pub mod beneficiary_service;
pub mod dashboard_service;
pub mod distribution_service;
pub mod ration_input_service;
pub mod ration_stock_service;
pub mod ration_type_service;
pub mod user_service;

pub use auth::AuthService;
pub use beneficiary_service::BeneficiaryService;
pub use dashboard_service::DashboardService;
pub use distribution_service::DistributionService;
pub use ration_input_service::RationInputService;
pub use ration_stock_service::RationStockService;
pub use ration_type_service::RationTypeService;
pub use user_service::UserService;

use serde_json::Value;

use crate::{common::error::AppError, models::BackendEntity};

// Resposta de criação/atualização. O backend devolve `null` quando o id não existe.
pub(crate) fn entity<T: BackendEntity>(body: Value, not_found: &str) -> Result<T, AppError> {
    match body {
        Value::Null => Err(AppError::NotFound(not_found.to_string())),
        raw => T::from_backend(raw),
    }
}
