// src/models/ration_input.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::lenient;
use super::{
    distribution::{positive_amount, required_id, RationSummary},
    BackendEntity,
};

// Entrada de ração no estoque
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationInput {
    #[serde(default, deserialize_with = "lenient::opt_int", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub ration_stock_id: i64,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ration_stock: Option<RationSummary>,
}

impl BackendEntity for RationInput {
    const NAME: &'static str = "entrada de ração";
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct RationInputCreate {
    #[validate(custom(function = "required_id"))]
    pub ration_stock_id: i64,
    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RationInputUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ration_stock_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
