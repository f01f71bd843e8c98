//! Geo lookup tables: tracking id → route endpoints, pincode → coordinate.
//!
//! The tables are plain data, populated once at startup (builtin dataset
//! or a JSON file) and then handed to the resolver, which never mutates
//! them. File format:
//!
//! ```json
//! { "routes": { "PKG1001": { "from": "400001", "to": "400063" } },
//!   "pincodes": { "400001": { "lat": 18.944, "lon": 72.835 } } }
//! ```

use super::types::RouteEndpoints;
use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ─── Built-in dataset ───────────────────────────────────────────

struct BuiltinPincode {
    pin: &'static str,
    lat: f64,
    lon: f64,
}

/// Representative coordinates for a handful of Indian metro pincodes.
const BUILTIN_PINCODES: &[BuiltinPincode] = &[
    BuiltinPincode { pin: "400001", lat: 18.944, lon: 72.835 },   // Mumbai Fort
    BuiltinPincode { pin: "400063", lat: 19.123, lon: 72.836 },   // Mumbai Goregaon
    BuiltinPincode { pin: "411001", lat: 18.5204, lon: 73.8567 }, // Pune
    BuiltinPincode { pin: "110001", lat: 28.6139, lon: 77.2090 }, // New Delhi
    BuiltinPincode { pin: "560001", lat: 12.9716, lon: 77.5946 }, // Bengaluru
    BuiltinPincode { pin: "600001", lat: 13.0827, lon: 80.2707 }, // Chennai
    BuiltinPincode { pin: "700001", lat: 22.5726, lon: 88.3639 }, // Kolkata
    BuiltinPincode { pin: "500001", lat: 17.3850, lon: 78.4867 }, // Hyderabad
];

const BUILTIN_ROUTES: &[(&str, &str, &str)] = &[
    ("PKG1001", "400001", "400063"),
    ("PKG1002", "400001", "110001"),
    ("PKG1003", "560001", "600001"),
    ("PKG1004", "700001", "500001"),
];

// ─── Table errors ───────────────────────────────────────────────

/// Failures while loading a tables file. These are startup-time
/// configuration errors, not request-time lookups.
#[derive(Debug)]
pub enum TablesError {
    Io(String),
    Parse(String),
}

impl fmt::Display for TablesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "Cannot read tables file: {}", msg),
            Self::Parse(msg) => write!(f, "Invalid tables file: {}", msg),
        }
    }
}

impl std::error::Error for TablesError {}

// ─── GeoTables ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoTables {
    #[serde(default)]
    routes: HashMap<String, RouteEndpoints>,
    #[serde(default)]
    pincodes: HashMap<String, Coordinate>,
}

impl GeoTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in reference dataset (Indian metro pincodes plus a few
    /// demo routes).
    pub fn builtin() -> Self {
        let mut tables = Self::new();
        for p in BUILTIN_PINCODES {
            tables.register_pincode(p.pin, Coordinate::new(p.lat, p.lon));
        }
        for (id, from, to) in BUILTIN_ROUTES {
            tables.register_route(*id, RouteEndpoints::new(*from, *to));
        }
        tables
    }

    /// Load tables from a JSON file. Coordinates are range-checked so a
    /// bad file is rejected here instead of producing garbage distances
    /// at resolve time.
    pub fn load_from(path: &Path) -> Result<Self, TablesError> {
        let data = fs::read_to_string(path).map_err(|e| TablesError::Io(e.to_string()))?;
        let tables: Self = serde_json::from_str(&data).map_err(|e| TablesError::Parse(e.to_string()))?;
        tables.validate()?;
        Ok(tables)
    }

    /// Serde bypasses `Coordinate::new`, so file-loaded coordinates get
    /// their range check here.
    fn validate(&self) -> Result<(), TablesError> {
        for (pin, c) in &self.pincodes {
            if !(-90.0..=90.0).contains(&c.lat) || !(-180.0..=180.0).contains(&c.lon) {
                return Err(TablesError::Parse(format!(
                    "pincode '{}' has out-of-range coordinate ({}, {})",
                    pin, c.lat, c.lon,
                )));
            }
        }
        Ok(())
    }

    /// Default tables path (~/.parceltrack/geotables.json).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".parceltrack")
            .join("geotables.json")
    }

    /// Write the tables out as pretty JSON.
    pub fn save_to(&self, path: &Path) -> Result<(), TablesError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TablesError::Io(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| TablesError::Parse(e.to_string()))?;
        fs::write(path, json).map_err(|e| TablesError::Io(e.to_string()))
    }

    pub fn register_route(&mut self, tracking_id: impl Into<String>, endpoints: RouteEndpoints) {
        self.routes.insert(tracking_id.into(), endpoints);
    }

    pub fn register_pincode(&mut self, pin: impl Into<String>, coord: Coordinate) {
        self.pincodes.insert(pin.into(), coord);
    }

    /// Exact-match route lookup.
    pub fn route(&self, tracking_id: &str) -> Option<&RouteEndpoints> {
        self.routes.get(tracking_id)
    }

    /// Exact-match coordinate lookup.
    pub fn coordinate(&self, pin: &str) -> Option<Coordinate> {
        self.pincodes.get(pin).copied()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn pincode_count(&self) -> usize {
        self.pincodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_covers_routes() {
        let tables = GeoTables::builtin();
        assert!(tables.route_count() >= 4);
        // Every builtin route endpoint must have a coordinate.
        for (id, _, _) in BUILTIN_ROUTES {
            let r = tables.route(id).unwrap();
            assert!(tables.coordinate(&r.from).is_some(), "missing {}", r.from);
            assert!(tables.coordinate(&r.to).is_some(), "missing {}", r.to);
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut tables = GeoTables::new();
        tables.register_pincode("400001", Coordinate::new(18.944, 72.835));
        tables.register_route("PKG42", RouteEndpoints::new("400001", "400001"));

        let r = tables.route("PKG42").unwrap();
        assert_eq!(r.from, "400001");
        assert!(tables.coordinate("400001").is_some());
        assert!(tables.coordinate("999999").is_none());
        assert!(tables.route("PKG43").is_none());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("geotables.json");

        let tables = GeoTables::builtin();
        tables.save_to(&path).unwrap();

        let loaded = GeoTables::load_from(&path).unwrap();
        assert_eq!(loaded.route_count(), tables.route_count());
        assert_eq!(loaded.pincode_count(), tables.pincode_count());
        assert_eq!(loaded.route("PKG1001"), tables.route("PKG1001"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = GeoTables::load_from(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(TablesError::Io(_))));
    }

    #[test]
    fn test_load_garbage_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json at all").unwrap();
        let result = GeoTables::load_from(&path);
        assert!(matches!(result, Err(TablesError::Parse(_))));
    }

    #[test]
    fn test_load_out_of_range_coordinate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad_coord.json");
        std::fs::write(
            &path,
            r#"{ "pincodes": { "400001": { "lat": 999.0, "lon": 72.835 } } }"#,
        )
        .unwrap();

        let result = GeoTables::load_from(&path);
        match result {
            Err(TablesError::Parse(msg)) => assert!(msg.contains("400001")),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_out_of_range_longitude() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad_lon.json");
        std::fs::write(
            &path,
            r#"{ "pincodes": { "110001": { "lat": 28.6139, "lon": -200.0 } } }"#,
        )
        .unwrap();

        assert!(matches!(GeoTables::load_from(&path), Err(TablesError::Parse(_))));
    }

    #[test]
    fn test_partial_file_defaults() {
        // A file with only pincodes still loads; routes default empty.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "pincodes": { "110001": { "lat": 28.6139, "lon": 77.209 } } }"#).unwrap();

        let tables = GeoTables::load_from(&path).unwrap();
        assert_eq!(tables.route_count(), 0);
        assert_eq!(tables.pincode_count(), 1);
    }
}
