#[cfg(feature = "core")]
#[doc(inline)]
pub use slkmerge_core as core;

#[cfg(feature = "overlaprs")]
#[doc(inline)]
pub use slkmerge_overlaprs as overlaprs;

#[cfg(feature = "merge")]
#[doc(inline)]
pub use slkmerge_merge as merge;
