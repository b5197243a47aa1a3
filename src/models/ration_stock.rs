// src/models/ration_stock.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::lenient;
use super::BackendEntity;

// Estoque de ração. `stock` só muda no servidor, via entradas e distribuições.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationStock {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub ration_type_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub stock: Decimal,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::id_list")]
    pub distributions_id: Vec<i64>,
}

impl BackendEntity for RationStock {
    const NAME: &'static str = "estoque de ração";
}

impl RationStock {
    /// Quantidade com a unidade, como aparece na listagem ("12.5 kg").
    pub fn stock_label(&self) -> String {
        if self.unit.is_empty() {
            self.stock.normalize().to_string()
        } else {
            format!("{} {}", self.stock.normalize(), self.unit)
        }
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct RationStockCreate {
    #[validate(length(min = 1, message = "O nome da ração é obrigatório."))]
    pub name: String,
    pub description: String,
    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,
    pub stock: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ration_type_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RationStockUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ration_type_id: Option<i64>,
}
