//! Argument groups shared by the subcommands.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use kpi_core::config::{
    PortalConfig, DEFAULT_HEADQUARTERS_PATH, DEFAULT_INDICATORS_PATH, DEFAULT_RESULTS_PATH,
    DEFAULT_TIMEOUT_SECS,
};
use kpi_data::filter::ResultFilter;
use kpi_data::paginate::PAGE_SIZE_CHOICES;
use kpi_utils::dates::parse_year;

/// Where the collections come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Portal API root URL
    #[arg(long, env = "KPI_API_URL")]
    pub api_url: Option<String>,

    /// Directory with results.json, indicators.json and headquarters.json
    #[arg(long, env = "KPI_SNAPSHOT_DIR", conflicts_with = "api_url")]
    pub snapshot: Option<PathBuf>,

    /// Bearer token for the portal API
    #[arg(long, env = "KPI_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "KPI_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Endpoint for detailed results, relative to the API URL
    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    pub results_path: String,

    /// Endpoint for indicators, relative to the API URL
    #[arg(long, default_value = DEFAULT_INDICATORS_PATH)]
    pub indicators_path: String,

    /// Endpoint for headquarters, relative to the API URL
    #[arg(long, default_value = DEFAULT_HEADQUARTERS_PATH)]
    pub headquarters_path: String,
}

impl SourceArgs {
    /// Build the API configuration from the arguments.
    pub fn portal_config(&self, base_url: &str) -> PortalConfig {
        let mut config = PortalConfig::new(base_url)
            .with_token(self.token.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        config.results_path = self.results_path.clone();
        config.indicators_path = self.indicators_path.clone();
        config.headquarters_path = self.headquarters_path.clone();
        config
    }
}

/// The results table filter. Omitted criteria impose no constraint.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text matched against indicator name/code and headquarters name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Indicator id
    #[arg(short, long)]
    pub indicator: Option<String>,

    /// Headquarters id
    #[arg(long)]
    pub headquarters: Option<String>,

    /// Year, e.g. 2024
    #[arg(short, long)]
    pub year: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> anyhow::Result<ResultFilter> {
        let year = match self.year.as_deref().map(str::trim) {
            Some(y) if !y.is_empty() => parse_year(y)?.to_string(),
            _ => String::new(),
        };
        Ok(ResultFilter {
            search: self.search.clone().unwrap_or_default(),
            indicator_id: trimmed(&self.indicator),
            headquarters_id: trimmed(&self.headquarters),
            year,
        })
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or("").to_string()
}

/// Accept one of the table's page sizes.
pub fn parse_page_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{}", e))?;
    if PAGE_SIZE_CHOICES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {:?}", PAGE_SIZE_CHOICES))
    }
}
