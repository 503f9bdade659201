//! List Query Engine
//!
//! Turns HTTP-style query parameters into a filtered, sorted and paginated
//! page over a typed collection.
//!
//! - [`params`]: parameter map and the lenient pagination/sort resolver
//! - [`fields`]: per-kind accessor tables used for filtering and sorting
//! - [`engine`]: the filter → sort → paginate pipeline

pub mod engine;
pub mod fields;
pub mod params;

pub use engine::{apply, filter, paginate, sort};
pub use fields::{sortable_keys, Field, FieldValue};
pub use params::{
    QueryParams, ResolvedPageSpec, SortDir, DEFAULT_LIMIT, DEFAULT_OFFSET, DEFAULT_SORT_KEY,
};
