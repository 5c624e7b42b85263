//! Per-screen state of the results table.
//!
//! `ResultsView` bundles what the results screen owns: the load state, the
//! loaded collections, the filter, the page size and the page navigator.
//! Filter and page-size changes reset to page 1; [`ResultsView::refresh`]
//! reruns filter, aggregation and pagination and persists a corrected page.

use kpi_core::{Collections, PortalError, ResultRecord};
use serde::Serialize;

use crate::aggregate::{summarize_source, ComplianceSummary};
use crate::catalog::IndicatorCatalog;
use crate::filter::ResultFilter;
use crate::navigation::{NavigationError, PageNavigator};
use crate::options::{headquarters_options, indicator_options, year_options, SelectOption};
use crate::paginate::{total_pages, PageSize, PageWindow};

/// Outcome of the last collection load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// User-visible message; cleared by [`ResultsView::retry`]
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ResultsView {
    load_state: LoadState,
    collections: Option<Collections>,
    filter: ResultFilter,
    page_size: PageSize,
    navigator: PageNavigator,
}

impl Default for ResultsView {
    fn default() -> Self {
        Self {
            load_state: LoadState::Loading,
            collections: None,
            filter: ResultFilter::default(),
            page_size: PageSize::default(),
            navigator: PageNavigator::new(),
        }
    }
}

/// Filter option lists for the selectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub indicators: Vec<SelectOption>,
    pub headquarters: Vec<SelectOption>,
    pub years: Vec<SelectOption>,
}

/// Everything the table renders after one recomputation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot<'a> {
    pub filter_active: bool,
    pub filtered: Vec<&'a ResultRecord>,
    pub summary: ComplianceSummary,
    pub page: PageWindow,
    pub page_size: PageSize,
    #[serde(skip)]
    pub catalog: IndicatorCatalog<'a>,
}

impl<'a> ViewSnapshot<'a> {
    /// Rows of the current page.
    pub fn page_rows(&self) -> &[&'a ResultRecord] {
        &self.filtered[self.page.range()]
    }
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the outcome of a load. A failure drops any previous data.
    pub fn load(&mut self, outcome: Result<Collections, PortalError>) {
        match outcome {
            Ok(collections) => {
                self.collections = Some(collections);
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                log::error!("Failed to load collections: {}", e);
                self.collections = None;
                self.load_state = LoadState::Failed(format!("Failed to load results: {}", e));
            }
        }
        self.navigator.reset();
    }

    /// Clear a failure before reloading.
    pub fn retry(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn collections(&self) -> Option<&Collections> {
        self.collections.as_ref()
    }

    pub fn filter(&self) -> &ResultFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ResultFilter) {
        self.filter = filter;
        self.navigator.reset();
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.navigator.reset();
    }

    pub fn current_page(&self) -> usize {
        self.navigator.current_page()
    }

    pub fn previous_page(&mut self) {
        self.navigator.previous();
    }

    pub fn next_page(&mut self) {
        self.navigator.next();
    }

    /// Jump to a page; only pages known from the last refresh are valid.
    pub fn jump_to(&mut self, page: usize) -> Result<(), NavigationError> {
        self.navigator.jump_to(page)
    }

    /// Option lists for the selectors, `None` until loaded.
    pub fn options(&self) -> Option<FilterOptions> {
        let c = self.collections.as_ref()?;
        Some(FilterOptions {
            indicators: indicator_options(&c.indicators),
            headquarters: headquarters_options(&c.headquarters),
            years: year_options(&c.results),
        })
    }

    /// Rerun filter, aggregation and pagination. `None` until loaded.
    pub fn refresh(&mut self) -> Option<ViewSnapshot<'_>> {
        let collections = self.collections.as_ref()?;
        let catalog = IndicatorCatalog::new(&collections.indicators);

        let filtered = self.filter.apply(&collections.results);
        let filter_active = self.filter.is_active();
        let summary = summarize_source(&collections.results, &filtered, filter_active, &catalog);

        self.navigator
            .sync(total_pages(filtered.len(), self.page_size));
        let page = PageWindow::new(
            filtered.len(),
            self.navigator.current_page(),
            self.page_size,
        );

        log::info!(
            "view: {} of {} results, page {}/{}",
            filtered.len(),
            collections.results.len(),
            page.current_page,
            page.total_pages
        );

        Some(ViewSnapshot {
            filter_active,
            filtered,
            summary,
            page,
            page_size: self.page_size,
            catalog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{headquarters, indicator, record};

    fn loaded(results: Vec<ResultRecord>) -> ResultsView {
        let mut view = ResultsView::new();
        view.load(Ok(Collections::new(
            results,
            vec![indicator("1", Some("IND-01"), "Falls", Some(100.0))],
            vec![headquarters("1", "North")],
        )));
        view
    }

    fn twenty_five() -> Vec<ResultRecord> {
        (1..=25)
            .map(|i| {
                let mut r = record(i, 1, if i <= 10 { 1 } else { 2 }, 2024);
                r.calculated_value = Some(100.0);
                r
            })
            .collect()
    }

    #[test]
    fn not_ready_until_loaded() {
        let mut view = ResultsView::new();
        assert_eq!(view.load_state(), &LoadState::Loading);
        assert!(view.refresh().is_none());
        assert!(view.options().is_none());
    }

    #[test]
    fn failed_load_surfaces_message_until_retry() {
        let mut view = loaded(twenty_five());
        view.load(Err(PortalError::Status {
            collection: "results",
            status: 503,
        }));
        match view.load_state() {
            LoadState::Failed(msg) => assert!(msg.contains("503")),
            other => panic!("unexpected state {:?}", other),
        }
        assert!(view.refresh().is_none());

        view.retry();
        assert_eq!(view.load_state(), &LoadState::Loading);
    }

    #[test]
    fn second_page_of_twenty_five() {
        let mut view = loaded(twenty_five());
        view.refresh();
        view.next_page();
        let snapshot = view.refresh().unwrap();
        assert_eq!(snapshot.page.total_pages, 2);
        assert_eq!(snapshot.page.current_page, 2);
        assert_eq!(snapshot.page.start_index, 21);
        assert_eq!(snapshot.page.end_index, 25);
        let ids: Vec<&str> = snapshot.page_rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["21", "22", "23", "24", "25"]);
    }

    #[test]
    fn summary_uses_whole_dataset_without_filter() {
        let mut view = loaded(twenty_five());
        let snapshot = view.refresh().unwrap();
        assert!(!snapshot.filter_active);
        assert_eq!(snapshot.summary.total_results, 25);
        assert_eq!(snapshot.summary.high_performance, 25);
        assert_eq!(snapshot.summary.unique_indicators, 1);
    }

    #[test]
    fn filter_change_resets_and_narrows_summary() {
        let mut view = loaded(twenty_five());
        view.refresh();
        view.next_page();
        assert_eq!(view.current_page(), 2);

        view.set_filter(ResultFilter {
            headquarters_id: "1".into(),
            ..Default::default()
        });
        assert_eq!(view.current_page(), 1);

        let snapshot = view.refresh().unwrap();
        assert!(snapshot.filter_active);
        assert_eq!(snapshot.filtered.len(), 10);
        assert_eq!(snapshot.summary.total_results, 10);
        assert_eq!(snapshot.page.total_pages, 1);
        assert_eq!(snapshot.page_rows().len(), 10);
    }

    #[test]
    fn shrinking_collection_self_corrects_page() {
        let mut view = loaded(twenty_five());
        view.refresh();
        view.next_page();
        // Mutate the data under the navigator without a filter reset.
        if let Some(c) = view.collections.as_mut() {
            c.results.truncate(10);
        }
        let snapshot = view.refresh().unwrap();
        assert_eq!(snapshot.page.current_page, 1);
        assert_eq!(snapshot.page_rows().len(), 10);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut view = loaded(twenty_five());
        view.set_page_size(PageSize::new(10).unwrap());
        view.refresh();
        view.jump_to(3).unwrap();
        assert_eq!(view.current_page(), 3);
        view.set_page_size(PageSize::new(50).unwrap());
        assert_eq!(view.current_page(), 1);
        let snapshot = view.refresh().unwrap();
        assert_eq!(snapshot.page.total_pages, 1);
    }

    #[test]
    fn jump_beyond_known_pages_is_rejected() {
        let mut view = loaded(twenty_five());
        view.refresh();
        assert!(view.jump_to(3).is_err());
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn options_are_derived_from_collections() {
        let view = loaded(twenty_five());
        let options = view.options().unwrap();
        assert_eq!(options.indicators[0].label, "IND-01 - Falls");
        assert_eq!(options.headquarters[0].label, "North");
        assert_eq!(options.years[0].value, "2024");
    }
}
