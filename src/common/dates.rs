// src/common/dates.rs

use chrono::{DateTime, NaiveDate};

/// Converte milissegundos desde a época para a data de calendário em UTC.
/// Nenhum dia é somado: o instante 00:00 UTC de um dia pertence a esse dia.
pub fn timestamp_to_date(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}

/// Interpreta uma data vinda da UI ou do backend.
///
/// Strings só com dígitos e mais de 10 caracteres são timestamps em
/// milissegundos. Caso contrário os 10 primeiros caracteres devem ser
/// `YYYY-MM-DD` (o resto de uma data-hora ISO é descartado) ou a data
/// inteira deve estar em `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();

    if s.chars().all(|c| c.is_ascii_digit()) {
        if s.len() > 10 {
            return s.parse::<i64>().ok().and_then(timestamp_to_date);
        }
        return None;
    }

    if let Some(date) = s
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
    {
        return Some(date);
    }

    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}
