//! Query layer: fluent builder and the rendered parameter map it produces.

pub mod builder;
pub mod params;

pub use builder::{Builder, DEFAULT_PER_PAGE, MAX_PER_PAGE, Queryable};
pub use params::{FilterValue, Query, QueryValue};
