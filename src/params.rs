use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::Value;
use time::{macros::format_description, Date};

use crate::error::ApiError;

/// A loosely typed JSON body field.
///
/// Callers send ids either as numbers or strings, so the raw value is kept
/// and parsed on demand. `null`, `false`, `0` and `""` count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Param(Option<Value>);

impl Param {
    pub fn is_present(&self) -> bool {
        match &self.0 {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    /// The field as text, `None` when absent.
    pub fn text(&self) -> Option<String> {
        if !self.is_present() {
            return None;
        }
        match self.0.as_ref()? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn parse<T>(&self, name: &str) -> Result<T, ApiError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.text().ok_or(ApiError::MissingParams)?;
        raw.trim()
            .parse::<T>()
            .map_err(|e| ApiError::internal(format!("invalid {name} \"{raw}\": {e}")))
    }

    pub fn date(&self, name: &str) -> Result<Date, ApiError> {
        let raw = self.text().ok_or(ApiError::MissingParams)?;
        parse_date(&raw).map_err(|e| ApiError::internal(format!("invalid {name} \"{raw}\": {e}")))
    }
}

pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
}

/// Returns 400 unless every field is present.
pub fn require(fields: &[&Param]) -> Result<(), ApiError> {
    if fields.iter().all(|p| p.is_present()) {
        Ok(())
    } else {
        Err(ApiError::MissingParams)
    }
}

/// Unwraps a JSON body; a malformed body is a 500 like any other failure.
pub fn body<T>(payload: Result<axum::Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|axum::Json(v)| v)
        .map_err(|e| ApiError::internal(e.body_text()))
}
