// src/models/distribution.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::common::lenient;
use super::BackendEntity;

// Resumo do beneficiário que o backend expande junto da distribuição
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiarySummary {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub document: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationSummary {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub unit: Option<String>,
}

// O estoque de ração já se chamou `ration_id`/`ration` e `ration_stock_id`/
// `ration_stock`, e as observações já vieram como `description`. Na leitura
// os dois nomes são aceitos, inclusive juntos; vale o nome novo.
#[derive(Deserialize)]
struct RawDistribution {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    beneficiary_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    ration_stock_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    ration_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    amount: Decimal,
    #[serde(default, deserialize_with = "lenient::date")]
    date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    observations: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    description: Option<String>,
    #[serde(default)]
    beneficiary: Option<BeneficiarySummary>,
    #[serde(default)]
    ration_stock: Option<RationSummary>,
    #[serde(default)]
    ration: Option<RationSummary>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    old: bool,
}

impl From<RawDistribution> for Distribution {
    fn from(raw: RawDistribution) -> Self {
        Self {
            id: raw.id,
            beneficiary_id: raw.beneficiary_id,
            ration_stock_id: raw.ration_stock_id.or(raw.ration_id).unwrap_or(0),
            amount: raw.amount,
            date: raw.date,
            observations: raw.observations.or(raw.description),
            beneficiary: raw.beneficiary,
            ration_stock: raw.ration_stock.or(raw.ration),
            old: raw.old,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDistribution")]
pub struct Distribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub beneficiary_id: i64,
    pub ration_stock_id: i64,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub observations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<BeneficiarySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ration_stock: Option<RationSummary>,
    pub old: bool,
}

impl BackendEntity for Distribution {
    const NAME: &'static str = "distribuição";
}

impl Distribution {
    pub fn beneficiary_name(&self) -> &str {
        self.beneficiary.as_ref().map_or("-", |b| b.name.as_str())
    }

    pub fn ration_name(&self) -> &str {
        self.ration_stock.as_ref().map_or("-", |r| r.name.as_str())
    }
}

pub(crate) fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        return Ok(());
    }
    let mut error = ValidationError::new("positive");
    error.message = Some("A quantidade deve ser maior que zero.".into());
    Err(error)
}

// O validator passa tipos `Copy` por valor para as funções `custom`.
pub(crate) fn required_id(id: i64) -> Result<(), ValidationError> {
    if id > 0 {
        return Ok(());
    }
    let mut error = ValidationError::new("required");
    error.message = Some("Selecione um registro válido.".into());
    Err(error)
}

// Corpo de `POST /distribution/`. O DTO do backend chama o estoque de `ration_id`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct DistributionCreate {
    #[validate(custom(function = "required_id"))]
    pub beneficiary_id: i64,
    #[serde(rename = "ration_id")]
    #[validate(custom(function = "required_id"))]
    pub ration_stock_id: i64,
    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DistributionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary_id: Option<i64>,
    #[serde(rename = "ration_id", skip_serializing_if = "Option::is_none")]
    pub ration_stock_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}
