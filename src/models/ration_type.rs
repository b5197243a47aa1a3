// src/models/ration_type.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::lenient;
use super::BackendEntity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationType {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
}

impl BackendEntity for RationType {
    const NAME: &'static str = "tipo de ração";
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct RationTypeCreate {
    #[validate(length(min = 1, message = "O nome do tipo é obrigatório."))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RationTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
