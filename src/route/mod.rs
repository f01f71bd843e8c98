//! Geo-route subsystem for Parceltrack.
//!
//! Resolves a tracking id to its declared origin/destination pincodes
//! and the great-circle distance between them, over injected lookup
//! tables.

pub mod resolver;
pub mod tables;
pub mod types;

pub use resolver::RouteResolver;
pub use tables::{GeoTables, TablesError};
pub use types::{RouteEndpoints, RouteError, RouteResult};
