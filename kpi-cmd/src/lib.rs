//! Command implementations for the KPI portal CLI.
//!
//! Every subcommand loads the three collections (from the portal API or a
//! snapshot directory), applies the filter arguments and renders one view
//! of the results pipeline.

use clap::{Subcommand, ValueEnum};

pub mod args;
pub mod export;
pub mod load;
pub mod report;

use args::{FilterArgs, SourceArgs};

/// Breakdown dimension for `summary --by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Breakdown {
    Indicator,
    Headquarters,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print compliance metrics for the filtered results (whole dataset when unfiltered)
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Also break the metrics down by indicator or headquarters
        #[arg(long, value_enum)]
        by: Option<Breakdown>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print one page of the filtered results
    List {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Page to show (1-based); out-of-range pages fall back to page 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page
        #[arg(long, default_value_t = 20, value_parser = args::parse_page_size)]
        per_page: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write the filtered results to a CSV file
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output path for the CSV
        #[arg(short, long)]
        output: String,
    },

    /// Print the indicator, headquarters and year choices for filtering
    Options {
        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary {
            source,
            filter,
            by,
            json,
        } => report::run_summary(&source, &filter, by, json).await,
        Command::List {
            source,
            filter,
            page,
            per_page,
            json,
        } => report::run_list(&source, &filter, page, per_page, json).await,
        Command::Export {
            source,
            filter,
            output,
        } => export::run_export(&source, &filter, &output).await,
        Command::Options { source, json } => report::run_options(&source, json).await,
    }
}
