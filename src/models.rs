// src/models.rs

pub mod auth;
pub mod beneficiary;
pub mod dashboard;
pub mod distribution;
pub mod ration_input;
pub mod ration_stock;
pub mod ration_type;
pub mod route;
pub mod session;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::common::error::AppError;

/// Conversão entre o JSON do backend e o model do cliente.
///
/// Os campos opcionais têm padrão explícito nos próprios models (ver
/// `common::lenient`), então `from_backend` nunca deixa campo indefinido; os
/// campos de identidade são obrigatórios e a falta deles vira `AppError::Schema`.
///
/// `from_backend(to_backend(x)) == x` vale para todo model. Os `Decimal` vão
/// ao backend como número JSON (f64), então a igualdade só é garantida até 15
/// dígitos significativos; acima disso o valor volta arredondado para o f64
/// mais próximo. Limites e quantidades de ração ficam muito abaixo disso.
pub trait BackendEntity: Sized + DeserializeOwned + Serialize {
    const NAME: &'static str;

    fn from_backend(raw: Value) -> Result<Self, AppError> {
        serde_json::from_value(raw).map_err(|e| AppError::Schema(format!("{}: {}", Self::NAME, e)))
    }

    fn to_backend(&self) -> Result<Value, AppError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl BackendEntity for auth::User {
    const NAME: &'static str = "usuário";
}

/// Corpo de atualização: os campos alterados mais o `id`, que os DTOs de
/// update do backend exigem no corpo.
pub(crate) fn with_id<T: Serialize>(changes: &T, id: i64) -> Result<Value, AppError> {
    let mut body = serde_json::to_value(changes)?;
    match &mut body {
        Value::Object(map) => {
            map.insert("id".to_string(), Value::from(id));
        }
        other => {
            return Err(AppError::Schema(format!(
                "corpo de atualização deveria ser um objeto, não {other}"
            )));
        }
    }
    Ok(body)
}
