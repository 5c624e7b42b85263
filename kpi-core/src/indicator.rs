use serde::{Deserialize, Serialize};

use crate::lenient;

/// A named metric definition with a numeric target and a trend direction.
///
/// Results reference indicators by id; the indicator's `target` and `trend`
/// stand in for a result that carries neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub target: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub trend: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub measurement_unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub measurement_frequency: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
}
