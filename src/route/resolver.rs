//! Route resolver — the pipeline tracking id → endpoints → coordinates
//! → haversine distance.
//!
//! Pure and synchronous. Any lookup miss is a terminal `NotFound`-class
//! error; there is nothing to retry.

use super::tables::GeoTables;
use super::types::{RouteError, RouteResult};
use crate::geo;

/// The resolver. Owns its lookup tables and never mutates them.
pub struct RouteResolver {
    tables: GeoTables,
}

impl RouteResolver {
    pub fn new(tables: GeoTables) -> Self {
        Self { tables }
    }

    /// Resolve a tracking id to its route and great-circle distance.
    pub fn resolve(&self, tracking_id: &str) -> Result<RouteResult, RouteError> {
        let endpoints = self
            .tables
            .route(tracking_id)
            .ok_or_else(|| RouteError::UnknownTracking(tracking_id.to_string()))?;

        let origin = self
            .tables
            .coordinate(&endpoints.from)
            .ok_or_else(|| RouteError::UnmappedPincode(endpoints.from.clone()))?;
        let destination = self
            .tables
            .coordinate(&endpoints.to)
            .ok_or_else(|| RouteError::UnmappedPincode(endpoints.to.clone()))?;

        let distance_km = geo::round2(geo::haversine_km(origin, destination));

        Ok(RouteResult {
            tracking_id: tracking_id.to_string(),
            from: endpoints.from.clone(),
            to: endpoints.to.clone(),
            distance_km,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::route::types::RouteEndpoints;

    fn fixture_resolver() -> RouteResolver {
        let mut tables = GeoTables::new();
        tables.register_pincode("400001", Coordinate::new(18.944, 72.835));
        tables.register_pincode("400063", Coordinate::new(19.123, 72.836));
        tables.register_route("PKG1001", RouteEndpoints::new("400001", "400063"));
        tables.register_route("PKG1005", RouteEndpoints::new("400063", "400001"));
        tables.register_route("PKG2000", RouteEndpoints::new("400001", "888888"));
        tables.register_route("PKG2001", RouteEndpoints::new("888888", "400001"));
        tables.register_route("PKGSAME", RouteEndpoints::new("400001", "400001"));
        RouteResolver::new(tables)
    }

    #[test]
    fn test_resolve_fixture() {
        let resolver = fixture_resolver();
        let result = resolver.resolve("PKG1001").unwrap();
        assert_eq!(result.tracking_id, "PKG1001");
        assert_eq!(result.from, "400001");
        assert_eq!(result.to, "400063");
        assert_eq!(result.distance_km, 19.9);
    }

    #[test]
    fn test_resolve_symmetric() {
        let resolver = fixture_resolver();
        let fwd = resolver.resolve("PKG1001").unwrap();
        let rev = resolver.resolve("PKG1005").unwrap();
        assert_eq!(fwd.distance_km, rev.distance_km);
    }

    #[test]
    fn test_resolve_same_endpoint() {
        let resolver = fixture_resolver();
        let result = resolver.resolve("PKGSAME").unwrap();
        assert_eq!(result.distance_km, 0.0);
    }

    #[test]
    fn test_unknown_tracking() {
        let resolver = fixture_resolver();
        let err = resolver.resolve("PKG9999").unwrap_err();
        assert_eq!(err, RouteError::UnknownTracking("PKG9999".into()));
    }

    #[test]
    fn test_unmapped_destination() {
        let resolver = fixture_resolver();
        let err = resolver.resolve("PKG2000").unwrap_err();
        assert_eq!(err, RouteError::UnmappedPincode("888888".into()));
    }

    #[test]
    fn test_unmapped_origin() {
        let resolver = fixture_resolver();
        let err = resolver.resolve("PKG2001").unwrap_err();
        assert_eq!(err, RouteError::UnmappedPincode("888888".into()));
    }

    #[test]
    fn test_builtin_tables_resolve() {
        let resolver = RouteResolver::new(GeoTables::builtin());
        let result = resolver.resolve("PKG1001").unwrap();
        assert_eq!(result.distance_km, 19.9);
    }
}
