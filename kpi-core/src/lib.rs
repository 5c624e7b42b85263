//! Core types and loaders for institutional indicator results.
//!
//! This crate provides:
//! - `record`, `indicator`, `headquarters`: the entities served by the portal API
//! - `reference`: normalization of object-or-id reference fields
//! - `collections`: the loaded triple of collections and the JSON snapshot loader
//! - `client`: the HTTP loader (behind the `api` feature)

pub mod collections;
pub mod config;
pub mod error;
pub mod headquarters;
pub mod indicator;
mod lenient;
pub mod record;
pub mod reference;

#[cfg(feature = "api")]
pub mod client;

pub use collections::Collections;
pub use error::{PortalError, Result};
pub use headquarters::Headquarters;
pub use indicator::Indicator;
pub use record::ResultRecord;
pub use reference::Reference;
