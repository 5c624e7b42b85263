//! Collection loading for the subcommands.

use kpi_core::client::PortalClient;
use kpi_core::{Collections, PortalError};
use kpi_data::view::{LoadState, ResultsView};
use log::info;

use crate::args::SourceArgs;

/// Load the three collections from the snapshot directory or the API.
pub async fn load_collections(source: &SourceArgs) -> kpi_core::Result<Collections> {
    if let Some(dir) = &source.snapshot {
        info!("Loading snapshot from {}", dir.display());
        return Collections::from_snapshot_dir(dir);
    }
    match source.api_url.as_deref() {
        Some(url) => {
            info!("Loading collections from {}", url);
            let client = PortalClient::new(source.portal_config(url))?;
            client.load_collections().await
        }
        None => Err(PortalError::Config(
            "either --api-url or --snapshot is required".to_string(),
        )),
    }
}

/// Load into a fresh view. A failed load is reported as an error carrying
/// the view's message; running the command again is the reload.
pub async fn load_view(source: &SourceArgs) -> anyhow::Result<ResultsView> {
    let mut view = ResultsView::new();
    view.load(load_collections(source).await);
    if let LoadState::Failed(message) = view.load_state() {
        anyhow::bail!("{} (re-run the command to retry)", message);
    }
    Ok(view)
}
