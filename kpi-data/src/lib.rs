//! Data shaping for indicator result tables.
//!
//! Stages run in one direction over the loaded collections:
//!
//! 1. [`filter`]: conjunction of optional search/indicator/headquarters/year criteria
//! 2. [`aggregate`]: compliance summary over the filtered or the full collection
//! 3. [`paginate`]: fixed-size pages with self-correcting page numbers
//!
//! [`view::ResultsView`] holds the per-screen state (filter, page size,
//! [`navigation::PageNavigator`]) and reruns the stages on every change.

pub mod aggregate;
pub mod catalog;
pub mod export;
pub mod filter;
pub mod navigation;
pub mod options;
pub mod paginate;
pub mod view;

#[cfg(test)]
pub(crate) mod fixtures;
