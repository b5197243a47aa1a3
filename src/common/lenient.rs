// src/common/lenient.rs
//
// Desserializadores tolerantes usados pelos models. O backend já mandou o mesmo
// campo como número, string numérica e `null` em versões diferentes; aqui cada
// campo opcional ganha um padrão explícito e os números passam por coerção.
// Formatos incompatíveis (objeto onde se espera número, por exemplo) continuam
// sendo erro, para a mudança de formato aparecer na borda do serviço.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

use crate::common::dates;

fn shape_error<E: serde::de::Error>(expected: &str, got: &Value) -> E {
    E::custom(format!("esperado {expected}, recebido {got}"))
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(shape_error("texto", &other)),
    }
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = string(deserializer)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

fn int_from_str(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

fn int_from_value(value: &Value) -> Result<Option<i64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))),
        Value::String(s) => Ok(int_from_str(s)),
        Value::Bool(_) => Ok(None),
        other => Err(format!("esperado número, recebido {other}")),
    }
}

/// Inteiro com padrão `0` para ausente, nulo ou não numérico.
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    int_from_value(&value)
        .map(|n| n.unwrap_or(0))
        .map_err(D::Error::custom)
}

pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    int_from_value(&value).map_err(D::Error::custom)
}

/// Identificador obrigatório: ausente ou não numérico é erro.
pub fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match int_from_value(&value).map_err(D::Error::custom)? {
        Some(n) => Ok(n),
        None => Err(shape_error("identificador numérico", &value)),
    }
}

pub(crate) fn decimal_from_str(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Decimal::ZERO),
        // `to_string` do serde_json preserva a representação curta (7.25, não 7.2499...)
        Value::Number(n) => Ok(decimal_from_str(&n.to_string()).unwrap_or(Decimal::ZERO)),
        Value::String(s) => Ok(decimal_from_str(&s).unwrap_or(Decimal::ZERO)),
        Value::Bool(_) => Ok(Decimal::ZERO),
        other => Err(shape_error("número decimal", &other)),
    }
}

pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            Ok(!(s.is_empty() || s == "false" || s == "0"))
        }
        other => Err(shape_error("booleano", &other)),
    }
}

/// Data opcional. Aceita `YYYY-MM-DD`, data-hora ISO (a hora é descartada) ou
/// milissegundos desde a época, que é o que o seletor de datas da UI produz.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(dates::timestamp_to_date)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("timestamp inválido: {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => dates::parse_date(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("data inválida: {s}"))),
        other => Err(shape_error("data", &other)),
    }
}

pub fn id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                int_from_value(item)
                    .map_err(D::Error::custom)?
                    .ok_or_else(|| shape_error("identificador numérico", item))
            })
            .collect(),
        other => Err(shape_error("lista de identificadores", &other)),
    }
}
