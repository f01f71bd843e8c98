//! In-memory parcel registry.
//!
//! Plain CRUD over a list of parcels keyed by exact tracking-number
//! match, plus the count aggregation and CSV bulk import. Wire field
//! names are camelCase for compatibility with earlier clients.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A registered parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub customer_name: String,
    pub delivery_address: String,
    pub contact_number: String,
    pub parcel_size: String,
    pub parcel_weight: String,
    pub tracking_number: String,
}

/// The reduced view returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelSummary {
    pub customer_name: String,
    pub delivery_address: String,
    pub tracking_number: String,
}

impl From<&Parcel> for ParcelSummary {
    fn from(p: &Parcel) -> Self {
        Self {
            customer_name: p.customer_name.clone(),
            delivery_address: p.delivery_address.clone(),
            tracking_number: p.tracking_number.clone(),
        }
    }
}

/// Parcel counts, total and grouped by declared size.
#[derive(Debug, Clone, Serialize)]
pub struct ParcelCounts {
    pub total: usize,
    pub by_size: HashMap<String, usize>,
}

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    NotFound(String),
    Duplicate(String),
    BadImport { line: usize, reason: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(_) => write!(f, "Parcel not found"),
            Self::Duplicate(id) => write!(f, "Parcel '{}' already exists", id),
            Self::BadImport { line, reason } => write!(f, "Import failed at line {}: {}", line, reason),
        }
    }
}

impl std::error::Error for RegistryError {}

/// The registry. A linear scan over an in-memory list is the whole
/// storage story; callers wrap it in a mutex if they share it.
#[derive(Debug, Default)]
pub struct ParcelRegistry {
    parcels: Vec<Parcel>,
}

impl ParcelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Vec<ParcelSummary> {
        self.parcels.iter().map(ParcelSummary::from).collect()
    }

    pub fn get(&self, tracking_number: &str) -> Result<&Parcel, RegistryError> {
        self.parcels
            .iter()
            .find(|p| p.tracking_number == tracking_number)
            .ok_or_else(|| RegistryError::NotFound(tracking_number.to_string()))
    }

    /// Register a new parcel. Duplicate tracking numbers are rejected so
    /// the by-tracking lookups stay unambiguous.
    pub fn create(&mut self, parcel: Parcel) -> Result<(), RegistryError> {
        if self.parcels.iter().any(|p| p.tracking_number == parcel.tracking_number) {
            return Err(RegistryError::Duplicate(parcel.tracking_number));
        }
        self.parcels.push(parcel);
        Ok(())
    }

    /// Replace the parcel with the given tracking number.
    pub fn update(&mut self, tracking_number: &str, updated: Parcel) -> Result<(), RegistryError> {
        match self.parcels.iter_mut().find(|p| p.tracking_number == tracking_number) {
            Some(slot) => {
                *slot = updated;
                Ok(())
            }
            None => Err(RegistryError::NotFound(tracking_number.to_string())),
        }
    }

    pub fn delete(&mut self, tracking_number: &str) -> Result<(), RegistryError> {
        match self.parcels.iter().position(|p| p.tracking_number == tracking_number) {
            Some(i) => {
                self.parcels.remove(i);
                Ok(())
            }
            None => Err(RegistryError::NotFound(tracking_number.to_string())),
        }
    }

    /// Total and per-size parcel counts.
    pub fn counts(&self) -> ParcelCounts {
        let mut by_size: HashMap<String, usize> = HashMap::new();
        for p in &self.parcels {
            *by_size.entry(p.parcel_size.clone()).or_insert(0) += 1;
        }
        ParcelCounts { total: self.parcels.len(), by_size }
    }

    /// Bulk import from CSV text:
    /// `customerName,deliveryAddress,contactNumber,parcelSize,parcelWeight,trackingNumber`.
    /// A leading header row is skipped. All-or-nothing: every line is
    /// parsed and checked before anything is inserted, so a bad line
    /// leaves the registry untouched. Returns how many parcels were
    /// added.
    pub fn import_csv(&mut self, body: &str) -> Result<usize, RegistryError> {
        let mut batch: Vec<Parcel> = Vec::new();
        for (i, raw) in body.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if i == 0 && line.to_lowercase().starts_with("customername") {
                continue; // header
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 6 {
                return Err(RegistryError::BadImport {
                    line: i + 1,
                    reason: format!("expected 6 fields, got {}", fields.len()),
                });
            }
            if fields.iter().any(|f| f.is_empty()) {
                return Err(RegistryError::BadImport {
                    line: i + 1,
                    reason: "empty field".into(),
                });
            }

            let tracking = fields[5];
            if self.parcels.iter().any(|p| p.tracking_number == tracking)
                || batch.iter().any(|p| p.tracking_number == tracking)
            {
                return Err(RegistryError::BadImport {
                    line: i + 1,
                    reason: RegistryError::Duplicate(tracking.to_string()).to_string(),
                });
            }

            batch.push(Parcel {
                customer_name: fields[0].to_string(),
                delivery_address: fields[1].to_string(),
                contact_number: fields[2].to_string(),
                parcel_size: fields[3].to_string(),
                parcel_weight: fields[4].to_string(),
                tracking_number: tracking.to_string(),
            });
        }
        let imported = batch.len();
        self.parcels.extend(batch);
        Ok(imported)
    }

    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }
}
