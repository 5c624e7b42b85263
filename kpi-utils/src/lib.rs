//! Shared utility functions for KPI portal crates.

/// Case-insensitive text matching
pub mod text {
    /// Lowercase a search term after trimming; `None` when nothing is left.
    pub fn search_term(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// True if the lowercased field contains an already-lowercased needle.
    /// Missing fields are treated as empty text.
    pub fn contains_folded(field: Option<&str>, folded_needle: &str) -> bool {
        field.unwrap_or("").to_lowercase().contains(folded_needle)
    }

}

/// Numeric helpers for ratio statistics
pub mod numbers {
    /// Keep a value only if it is finite and strictly positive.
    pub fn positive_finite(value: Option<f64>) -> Option<f64> {
        value.filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Arithmetic mean, 0 for an empty slice.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

}

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, Local};

    /// Parse a year filter value such as "2024".
    pub fn parse_year(s: &str) -> anyhow::Result<i32> {
        let year: i32 = s.trim().parse()?;
        if !(1900..=9999).contains(&year) {
            anyhow::bail!("year {} is out of range", year);
        }
        Ok(year)
    }

    /// Format a load timestamp as "YYYY-MM-DD HH:MM:SS"
    pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
        timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }

}
