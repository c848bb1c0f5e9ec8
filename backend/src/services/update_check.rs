//! Decides whether a full task update would change anything.
//!
//! The stored record is rendered to the same JSON shape the client submits,
//! with both date columns normalized to ISO 8601, and compared structurally
//! against the payload. Any difference, including extra or missing keys,
//! counts as a change.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Value, json};

use crate::models::Tarefa;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// True when `submitted` is deep-equal to the stored task. An integer `id` in
/// the payload matches the same id stored as text.
pub fn is_unchanged(submitted: &Value, stored: &Tarefa) -> bool {
    let snapshot = stored_snapshot(stored);

    match submitted.get("id") {
        Some(Value::Number(id)) if id.is_i64() || id.is_u64() => {
            let mut submitted = submitted.clone();
            submitted["id"] = Value::String(id.to_string());
            deep_equal(&submitted, &snapshot)
        }
        _ => deep_equal(submitted, &snapshot),
    }
}

/// JSON view of a stored task with its dates in canonical form.
pub fn stored_snapshot(tarefa: &Tarefa) -> Value {
    json!({
        "id": tarefa.id,
        "nome": tarefa.nome,
        "descricao": tarefa.descricao,
        "periodicidade": tarefa.periodicidade,
        "dataInicio": normalize_timestamp(&tarefa.data_inicio),
        "dataPrevisao": normalize_timestamp(&tarefa.data_previsao),
        "status": tarefa.status,
        "comentarios": tarefa.comentarios,
    })
}

/// Renders a stored timestamp as `YYYY-MM-DDTHH:MM:SS.sssZ` in UTC.
///
/// Accepts RFC 3339 (any offset), SQL `DATETIME` text and bare dates; values
/// without an offset are taken as UTC. Anything else is returned untouched so
/// the comparison simply reports a difference.
pub fn normalize_timestamp(raw: &str) -> String {
    canonical_timestamp(raw).unwrap_or_else(|| raw.to_string())
}

/// Same rendering as [`normalize_timestamp`], or `None` when `raw` is not a
/// timestamp at all. Used to validate dates before they are written.
pub fn canonical_timestamp(raw: &str) -> Option<String> {
    parse_timestamp(raw.trim()).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Structural equality over JSON values.
///
/// Objects must have the same key set with pairwise-equal values regardless of
/// key order; arrays must match element by element. Numbers compare by value,
/// so `1` and `1.0` are equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .all(|(key, value)| right.get(key).is_some_and(|other| deep_equal(value, other)))
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len() && left.iter().zip(right).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Number(left), Value::Number(right)) => {
            match (left.as_i64(), right.as_i64()) {
                (Some(x), Some(y)) => x == y,
                _ => match (left.as_u64(), right.as_u64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => left.as_f64() == right.as_f64(),
                },
            }
        }
        _ => a == b,
    }
}
