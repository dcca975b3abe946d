//! Merge road segment tables on overlapping SLK intervals.
//!
//! A *target* table describes road segments (for example a dTIMS segmentation)
//! and a *data* table holds measurements referenced along the same roads. For
//! each target segment, the data rows sharing its join key (road number,
//! carriageway, ...) whose SLK interval overlaps the segment are combined into
//! one value per [`Action`]:
//!
//! - [`Aggregation::First`]: first overlapping value in data row order
//! - [`Aggregation::Average`]: plain mean
//! - [`Aggregation::LengthWeightedAverage`]: mean weighted by overlap length
//! - [`Aggregation::LengthWeightedPercentile`]: interpolated weighted percentile
//! - [`Aggregation::KeepLongestSegment`]: value of the row with the longest overlap
//! - [`Aggregation::KeepLongest`]: value with the longest total overlap
//! - [`Aggregation::Sum`] and [`Aggregation::ProportionalSum`]
//! - [`Aggregation::IndexOfMax`]: row label of the largest value
//!
//! ```rust
//! use slkmerge_core::models::{Column, Table, Value};
//! use slkmerge_merge::{Action, Aggregation, MergeConfig, on_slk_intervals};
//!
//! let segments = Table::new(vec![
//!     Column::new("road_no", vec!["H001", "H001"]),
//!     Column::new("slk_from", vec![0.0, 0.5]),
//!     Column::new("slk_to", vec![0.5, 1.0]),
//! ]).unwrap();
//!
//! let roughness = Table::new(vec![
//!     Column::new("road_no", vec!["H001", "H001", "H001"]),
//!     Column::new("slk_from", vec![0.0, 0.3, 0.6]),
//!     Column::new("slk_to", vec![0.3, 0.6, 1.0]),
//!     Column::new("iri", vec![2.0, 4.0, 3.0]),
//! ]).unwrap();
//!
//! let merged = on_slk_intervals(
//!     &segments,
//!     &roughness,
//!     &["road_no"],
//!     &[
//!         Action::new("iri", Aggregation::Average).with_rename("iri_mean"),
//!         Action::new("iri", Aggregation::KeepLongestSegment),
//!     ],
//!     &MergeConfig::default().with_parallel(true),
//! ).unwrap();
//!
//! assert_eq!(merged.value(0, "iri_mean"), Some(Value::Float(3.0)));
//! assert_eq!(merged.value(1, "iri"), Some(Value::Float(3.0)));
//! ```

pub mod action;
pub mod aggregation;
pub mod assembler;
pub mod config;
pub mod errors;
pub mod group_index;
pub mod merge;
pub mod overlap;

// re-exports
pub use self::action::{Action, Infill};
pub use self::aggregation::{Aggregation, Percentile};
pub use self::config::MergeConfig;
pub use self::errors::{AggregationError, MergeError};
pub use self::merge::{merge, on_slk_intervals};
