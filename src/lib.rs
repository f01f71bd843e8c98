//! Parceltrack — parcel-delivery tracking with geodesic route lookup.
//!
//! The core is the route subsystem: tracking id → declared
//! origin/destination pincodes → coordinates → haversine distance.
//! Around it sit an in-memory parcel registry, bearer-token roles, and
//! an axum HTTP service.

pub mod auth;
pub mod geo;
pub mod registry;
pub mod route;
pub mod server;
