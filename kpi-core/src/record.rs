use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::reference::{normalize, Reference};

/// One recorded measurement of an indicator at a headquarters for a period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub indicator: Option<Reference>,
    #[serde(default)]
    pub headquarters: Option<Reference>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub indicator_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub indicator_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub headquarter_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::month")]
    pub month: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub quarter: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub semester: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub calculated_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub target: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub trend: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub measurement_unit: Option<String>,
}

/// The sub-period marker shown next to the year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubPeriod<'a> {
    Quarter(&'a str),
    Semester(&'a str),
    Period(&'a str),
}

impl std::fmt::Display for SubPeriod<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubPeriod::Quarter(q) => write!(f, "Q{}", q),
            SubPeriod::Semester(s) => write!(f, "S{}", s),
            SubPeriod::Period(p) => write!(f, "{}", p),
        }
    }
}

impl ResultRecord {
    /// Normalized indicator id, `""` when missing or malformed.
    pub fn indicator_id(&self) -> String {
        normalize(self.indicator.as_ref())
    }

    /// Normalized headquarters id, `""` when missing or malformed.
    pub fn headquarters_id(&self) -> String {
        normalize(self.headquarters.as_ref())
    }

    /// The year as filter text, `""` when missing.
    pub fn year_text(&self) -> String {
        self.year.map(|y| y.to_string()).unwrap_or_default()
    }

    /// First populated marker in order quarter, semester, period.
    pub fn sub_period(&self) -> Option<SubPeriod<'_>> {
        if let Some(q) = self.quarter.as_deref() {
            return Some(SubPeriod::Quarter(q));
        }
        if let Some(s) = self.semester.as_deref() {
            return Some(SubPeriod::Semester(s));
        }
        self.period.as_deref().map(SubPeriod::Period)
    }

    /// Period shown in tables: the sub-period marker, else the month name.
    pub fn period_label(&self) -> String {
        if let Some(sub) = self.sub_period() {
            return sub.to_string();
        }
        self.month
            .and_then(|m| chrono::Month::try_from(m as u8).ok())
            .map(|m| m.name().to_string())
            .unwrap_or_default()
    }

    /// Headquarters display name, falling back to the embedded object's name.
    pub fn headquarters_label(&self) -> Option<&str> {
        self.headquarter_name
            .as_deref()
            .or_else(|| self.headquarters.as_ref().and_then(Reference::embedded_name))
    }
}
