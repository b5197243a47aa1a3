// src/api/list.rs

use serde::Serialize;
use serde_json::Value;

use crate::{common::error::AppError, models::BackendEntity};

/// Resultado de uma listagem já normalizada.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// Paginação e filtros aceitos pelas rotas de listagem
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    // Registros anteriores à data de corte (só para gestores)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_old: Option<bool>,
}

impl ListFilters {
    pub fn paged(skip: u32, limit: u32) -> Self {
        Self { skip: Some(skip), limit: Some(limit), include_old: None }
    }
}

const WRAPPED_LIST_KEYS: [&str; 4] = ["items", "beneficiaries", "results", "data"];
const WRAPPED_COUNT_KEYS: [&str; 2] = ["total", "count"];

/// Desembrulha os três formatos de listagem que o backend já usou:
/// lista pura, par `[itens, total]` e objeto `{ items|beneficiaries, total }`.
/// Devolve os itens crus e o total informado pelo backend, se houver.
pub fn unwrap_list(body: Value) -> Result<(Vec<Value>, Option<u64>), AppError> {
    match body {
        Value::Null => Ok((Vec::new(), None)),
        Value::Array(mut items) => {
            let is_pair = items.len() == 2 && items[0].is_array() && items[1].is_number();
            if is_pair {
                let count = items[1].as_u64();
                if let Value::Array(list) = items.swap_remove(0) {
                    return Ok((list, count));
                }
            }
            Ok((items, None))
        }
        Value::Object(mut map) => {
            let count = WRAPPED_COUNT_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_u64));
            for key in WRAPPED_LIST_KEYS {
                if let Some(Value::Array(list)) = map.remove(key) {
                    return Ok((list, count));
                }
            }
            Err(AppError::Schema(format!(
                "listagem sem itens reconhecíveis (chaves: {:?})",
                map.keys().collect::<Vec<_>>()
            )))
        }
        other => Err(AppError::Schema(format!("listagem inesperada: {other}"))),
    }
}

/// Normaliza uma listagem. O total devolvido é sempre o número de itens
/// recebidos; um total divergente do backend só é registrado no log.
pub fn page_from<T: BackendEntity>(body: Value) -> Result<Page<T>, AppError> {
    let (raw_items, backend_count) = unwrap_list(body)?;
    let items = raw_items
        .into_iter()
        .map(T::from_backend)
        .collect::<Result<Vec<T>, AppError>>()?;

    if let Some(count) = backend_count {
        if count as usize != items.len() {
            tracing::debug!(
                "Backend informou {} {}(s), mas devolveu {} nesta página",
                count,
                T::NAME,
                items.len()
            );
        }
    }

    Ok(Page { total: items.len(), items })
}
