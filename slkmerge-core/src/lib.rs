//! Core models for slkmerge: tools for merging linear-referenced road data.
//!
//! Road networks are described by segments along a linear coordinate, the
//! SLK (straight line kilometre), keyed by road number and carriageway. This
//! crate provides the in-memory [`models::Table`] both sides of a merge are
//! expressed in, the half-open [`models::Interval`] used for overlap
//! queries, the standard dTIMS column names and a few small helpers.
//!
//! ```rust
//! use slkmerge_core::models::{Column, Table};
//! use slkmerge_core::lookups::CN;
//!
//! let segments = Table::new(vec![
//!     Column::new(CN.road_number, vec!["H001", "H001"]),
//!     Column::new(CN.slk_from, vec![0.0, 0.1]),
//!     Column::new(CN.slk_to, vec![0.1, 0.2]),
//! ])
//! .unwrap();
//!
//! assert_eq!(segments.n_rows(), 2);
//! ```

pub mod errors;
pub mod lookups;
pub mod models;
pub mod utils;
