//! The three collections a results screen loads, and their JSON decoding.
//!
//! Collections arrive either from the portal API (see `client`, behind the
//! `api` feature) or from a snapshot directory holding one JSON file per
//! collection:
//!
//! - `results.json`
//! - `indicators.json`
//! - `headquarters.json`
//!
//! Each body may be a bare JSON array or an envelope `{"data": [...]}`.

use chrono::{DateTime, Local};
use log::info;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

use crate::error::{PortalError, Result};
use crate::{Headquarters, Indicator, ResultRecord};

pub const RESULTS: &str = "results";
pub const INDICATORS: &str = "indicators";
pub const HEADQUARTERS: &str = "headquarters";

/// Everything a results screen holds after a successful load.
#[derive(Debug, Clone)]
pub struct Collections {
    pub results: Vec<ResultRecord>,
    pub indicators: Vec<Indicator>,
    pub headquarters: Vec<Headquarters>,
    /// When the load completed
    pub loaded_at: DateTime<Local>,
}

impl Collections {
    pub fn new(
        results: Vec<ResultRecord>,
        indicators: Vec<Indicator>,
        headquarters: Vec<Headquarters>,
    ) -> Self {
        info!(
            "Loaded {} results, {} indicators, {} headquarters",
            results.len(),
            indicators.len(),
            headquarters.len()
        );
        Self {
            results,
            indicators,
            headquarters,
            loaded_at: Local::now(),
        }
    }

    /// Load all three collections from a snapshot directory.
    pub fn from_snapshot_dir(dir: &Path) -> Result<Self> {
        let results = read_collection(dir, RESULTS)?;
        let indicators = read_collection(dir, INDICATORS)?;
        let headquarters = read_collection(dir, HEADQUARTERS)?;
        Ok(Self::new(results, indicators, headquarters))
    }
}

fn read_collection<T: DeserializeOwned>(dir: &Path, collection: &'static str) -> Result<Vec<T>> {
    let path = dir.join(format!("{}.json", collection));
    let body = std::fs::read_to_string(&path).map_err(|source| PortalError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode_collection(collection, &body)
}

/// Decode a collection body that is either a bare array or a `data` envelope.
pub fn decode_collection<T: DeserializeOwned>(
    collection: &'static str,
    body: &str,
) -> Result<Vec<T>> {
    let value: Value =
        serde_json::from_str(body).map_err(|source| PortalError::Decode { collection, source })?;
    let items = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Array(_)) => data,
            _ => {
                return Err(PortalError::Shape {
                    collection,
                    detail: "object without a `data` array".to_string(),
                })
            }
        },
        other => {
            return Err(PortalError::Shape {
                collection,
                detail: format!("expected an array, got {}", json_kind(&other)),
            })
        }
    };
    serde_json::from_value(items).map_err(|source| PortalError::Decode { collection, source })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
