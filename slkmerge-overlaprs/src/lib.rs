//! Interval overlap queries along linear road coordinates.
//!
//! Road data is referenced by position along the road (SLK), so every record
//! covers a half-open range `[from, to)` of a floating point coordinate. This
//! crate provides the data structure used to find which records of one table
//! overlap a segment of another.
//!
//! The merge crate builds one index per join key and reads overlap lengths
//! from the returned intervals; it never scans rows itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use slkmerge_overlaprs::{Bits, Overlapper, Interval};
//!
//! // roughness measurements along a road
//! let measurements = vec![
//!     Interval { start: 0.05, end: 0.14, val: 1.0 },
//!     Interval { start: 0.14, end: 0.32, val: 8.0 },
//! ];
//!
//! let index = Bits::build(measurements);
//!
//! // which measurements overlap the segment 0.1 km to 0.2 km?
//! let overlaps = index.find(0.1, 0.2);
//! assert_eq!(overlaps.len(), 2);
//!
//! // and by how much?
//! for interval in index.find_iter(0.1, 0.2) {
//!     println!("{} km of {}", interval.intersect(0.1, 0.2), interval.val);
//! }
//! ```

/// Binary interval search, see [`Bits`].
pub mod bits;

/// The [`Overlapper`] query interface.
pub mod traits;

// re-exports
pub use self::bits::Bits;
pub use self::traits::{Interval, Overlapper};
