// src/models/beneficiary.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::common::{dates, error::AppError, lenient};
use super::{with_id, BackendEntity};

pub const DEFAULT_CITY: &str = "Pindamonhangaba";
pub const DEFAULT_STATE: &str = "SP";

fn city<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let city = lenient::string(deserializer)?;
    Ok(if city.trim().is_empty() { DEFAULT_CITY.to_string() } else { city })
}

fn state<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let state = lenient::string(deserializer)?;
    Ok(if state.trim().is_empty() { DEFAULT_STATE.to_string() } else { state })
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

fn default_state() -> String {
    DEFAULT_STATE.to_string()
}

// --- Beneficiário como o cliente enxerga ---
// Endereço estruturado; `full_address` é calculado pelo backend quando existe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub document: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub street: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub neighborhood: String,
    #[serde(default = "default_city", deserialize_with = "city")]
    pub city: String,
    #[serde(default = "default_state", deserialize_with = "state")]
    pub state: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub complement: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    // Endereço em texto livre das primeiras versões do backend
    #[serde(
        rename = "address",
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_address: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub contact: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub monthly_limit: Decimal,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub mother_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub birth_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient::int")]
    pub qtd_dogs: i64,
    #[serde(default, deserialize_with = "lenient::int")]
    pub qtd_castred_dogs: i64,
    #[serde(default, deserialize_with = "lenient::int")]
    pub qtd_cats: i64,
    #[serde(default, deserialize_with = "lenient::int")]
    pub qtd_castred_cats: i64,

    #[serde(default, deserialize_with = "lenient::boolean")]
    pub government_benefit: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub receives_basic_basket: bool,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub receives_bpc_loas: bool,

    // CadÚnico (Cadastro Único)
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cadunico_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub income_range: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub how_did_you_hear: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub observations: Option<String>,

    // Registro anterior à data de corte
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub old: bool,
}

impl BackendEntity for Beneficiary {
    const NAME: &'static str = "beneficiário";
}

impl Beneficiary {
    pub fn is_address_valid(&self) -> bool {
        !self.street.trim().is_empty() && !self.neighborhood.trim().is_empty()
    }

    /// Endereço para exibição. Usa o `full_address` do backend quando vier;
    /// senão monta a partir dos campos, omitindo cidade e estado padrão.
    pub fn formatted_address(&self) -> String {
        if let Some(full) = &self.full_address {
            return full.clone();
        }

        let mut parts: Vec<String> = Vec::new();
        if !self.street.is_empty() {
            parts.push(self.street.clone());
        }
        if let Some(number) = &self.number {
            parts.push(format!("nº {number}"));
        }
        if let Some(complement) = &self.complement {
            parts.push(format!("({complement})"));
        }
        if !self.neighborhood.is_empty() {
            parts.push(format!("- {}", self.neighborhood));
        }
        if !self.city.is_empty() && self.city != DEFAULT_CITY {
            parts.push(format!("- {}", self.city));
        }
        if !self.state.is_empty() && self.state != DEFAULT_STATE {
            parts.push(format!("/{}", self.state));
        }

        if parts.is_empty() {
            return self.legacy_address.clone().unwrap_or_default();
        }
        parts.join(" ")
    }
}

/// Data como chega da UI: já como data, como timestamp do seletor de datas
/// (milissegundos) ou como texto.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Date(NaiveDate),
    EpochMillis(i64),
    Text(String),
}

impl DateInput {
    pub fn normalize(&self) -> Result<NaiveDate, AppError> {
        match self {
            DateInput::Date(date) => Ok(*date),
            DateInput::EpochMillis(ms) => dates::timestamp_to_date(*ms)
                .ok_or_else(|| AppError::InvalidDate(ms.to_string())),
            DateInput::Text(text) => {
                dates::parse_date(text).ok_or_else(|| AppError::InvalidDate(text.clone()))
            }
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

fn normalize_date(input: Option<&DateInput>) -> Result<Option<NaiveDate>, AppError> {
    input.map(DateInput::normalize).transpose()
}

// --- Dados do formulário de cadastro ---
#[derive(Debug, Clone, Default, Validate)]
pub struct NewBeneficiary {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub document: String,

    #[validate(length(min = 1, message = "Rua e bairro são obrigatórios"))]
    pub street: String,
    pub number: Option<String>,
    #[validate(length(min = 1, message = "Rua e bairro são obrigatórios"))]
    pub neighborhood: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub complement: Option<String>,

    pub contact: String,
    pub monthly_limit: Option<Decimal>,
    pub mother_name: Option<String>,
    pub birth_date: Option<DateInput>,
    pub qtd_dogs: Option<i64>,
    pub qtd_castred_dogs: Option<i64>,
    pub qtd_cats: Option<i64>,
    pub qtd_castred_cats: Option<i64>,
    pub government_benefit: Option<bool>,
    pub receives_basic_basket: Option<bool>,
    pub receives_bpc_loas: Option<bool>,
    pub cadunico_code: Option<String>,
    pub income_range: Option<String>,
    pub how_did_you_hear: Option<String>,
    pub observations: Option<String>,
}

// Corpo de `POST /beneficiary/`: todos os campos presentes, nulos explícitos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeneficiaryPayload {
    pub name: String,
    pub document: String,
    pub street: String,
    pub number: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
    pub complement: Option<String>,
    pub contact: String,
    pub monthly_limit: Decimal,
    pub mother_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub qtd_dogs: i64,
    pub qtd_castred_dogs: i64,
    pub qtd_cats: i64,
    pub qtd_castred_cats: i64,
    pub government_benefit: bool,
    pub receives_basic_basket: bool,
    pub receives_bpc_loas: bool,
    pub cadunico_code: Option<String>,
    pub income_range: Option<String>,
    pub how_did_you_hear: Option<String>,
    pub observations: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl NewBeneficiary {
    pub fn has_address(&self) -> bool {
        !self.street.trim().is_empty() && !self.neighborhood.trim().is_empty()
    }

    /// Valida e monta o corpo da criação. Nada aqui faz requisição.
    pub fn into_payload(self) -> Result<BeneficiaryPayload, AppError> {
        if !self.has_address() {
            return Err(AppError::MissingAddress);
        }
        self.validate()?;

        let birth_date = normalize_date(self.birth_date.as_ref())?;

        Ok(BeneficiaryPayload {
            name: self.name,
            document: self.document,
            street: self.street,
            number: non_blank(self.number),
            neighborhood: self.neighborhood,
            city: non_blank(self.city).unwrap_or_else(default_city),
            state: non_blank(self.state).unwrap_or_else(default_state),
            zip_code: non_blank(self.zip_code),
            complement: non_blank(self.complement),
            contact: self.contact,
            monthly_limit: self.monthly_limit.unwrap_or(Decimal::ZERO),
            mother_name: non_blank(self.mother_name),
            birth_date,
            qtd_dogs: self.qtd_dogs.unwrap_or(0),
            qtd_castred_dogs: self.qtd_castred_dogs.unwrap_or(0),
            qtd_cats: self.qtd_cats.unwrap_or(0),
            qtd_castred_cats: self.qtd_castred_cats.unwrap_or(0),
            government_benefit: self.government_benefit.unwrap_or(false),
            receives_basic_basket: self.receives_basic_basket.unwrap_or(false),
            receives_bpc_loas: self.receives_bpc_loas.unwrap_or(false),
            cadunico_code: non_blank(self.cadunico_code),
            income_range: non_blank(self.income_range),
            how_did_you_hear: non_blank(self.how_did_you_hear),
            observations: non_blank(self.observations),
        })
    }
}

// --- Atualização parcial ---
// Campos `None` não são enviados, para não sobrescrever o valor do servidor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BeneficiaryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
    #[serde(skip)]
    pub birth_date: Option<DateInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qtd_dogs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qtd_castred_dogs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qtd_cats: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qtd_castred_cats: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub government_benefit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receives_basic_basket: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receives_bpc_loas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadunico_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_did_you_hear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl BeneficiaryUpdate {
    /// Corpo de `PUT /beneficiary/`: o `id` vai junto, exigido pelo DTO do backend.
    pub fn into_payload(self, id: i64) -> Result<Value, AppError> {
        let birth_date = normalize_date(self.birth_date.as_ref())?;

        let mut body = with_id(&self, id)?;
        if let (Some(date), Value::Object(map)) = (birth_date, &mut body) {
            map.insert("birth_date".to_string(), Value::from(date.to_string()));
        }
        Ok(body)
    }
}

// Resposta das buscas por endereço: `{ "beneficiaries": [...], "total": n }`
#[derive(Debug, Clone, Deserialize)]
pub struct BeneficiarySearchResponse {
    #[serde(default)]
    pub beneficiaries: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub total: i64,
}
