//! Core types for the route subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared endpoints of a shipment, keyed by postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEndpoints {
    pub from: String,
    pub to: String,
}

impl RouteEndpoints {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

/// A resolved route with its great-circle distance.
///
/// Field names are the wire shape: `{tracking_id, from, to, distance_km}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub tracking_id: String,
    pub from: String,
    pub to: String,
    pub distance_km: f64,
}

/// Route resolution errors. Every variant is a terminal not-found from
/// the caller's point of view; the variants exist so logs can say which
/// lookup missed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No route registered for this tracking id.
    UnknownTracking(String),
    /// A route endpoint's postal code has no coordinate entry.
    UnmappedPincode(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTracking(id) => write!(f, "No route registered for tracking id '{}'", id),
            Self::UnmappedPincode(pin) => write!(f, "No coordinate registered for pincode '{}'", pin),
        }
    }
}

impl std::error::Error for RouteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_result_wire_shape() {
        let result = RouteResult {
            tracking_id: "PKG1001".into(),
            from: "400001".into(),
            to: "400063".into(),
            distance_km: 19.9,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["tracking_id"], "PKG1001");
        assert_eq!(json["from"], "400001");
        assert_eq!(json["to"], "400063");
        assert_eq!(json["distance_km"], 19.9);
    }

    #[test]
    fn test_error_display() {
        let e = RouteError::UnknownTracking("PKG9999".into());
        assert!(e.to_string().contains("PKG9999"));
        let e = RouteError::UnmappedPincode("999999".into());
        assert!(e.to_string().contains("999999"));
    }
}
