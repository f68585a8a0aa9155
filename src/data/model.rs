use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Record – one used-car listing
// ---------------------------------------------------------------------------

/// A single listing (one row of the source table).
///
/// Numeric columns are always populated; only the categorical columns
/// `fuel_type` and `service_history` may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub make_year: i32,
    pub brand: String,
    pub fuel_type: Option<String>,
    pub transmission: String,
    pub price_usd: f64,
    pub owner_count: u32,
    pub service_history: Option<String>,
    pub mileage_kmpl: f64,
    pub engine_cc: i64,
}

// ---------------------------------------------------------------------------
// DatasetProfile – observed ranges and categories
// ---------------------------------------------------------------------------

/// Ranges and distinct categories observed when the dataset was built.
/// Default filter selections and criteria validation are derived from this.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetProfile {
    pub year_min: i32,
    pub year_max: i32,
    pub price_min: f64,
    pub price_max: f64,
    pub owner_max: u32,
    pub brands: BTreeSet<String>,
    pub fuel_types: BTreeSet<String>,
    pub transmissions: BTreeSet<String>,
    pub service_histories: BTreeSet<String>,
}

impl DatasetProfile {
    fn from_records(records: &[Record]) -> Option<Self> {
        let first = records.first()?;
        let mut profile = DatasetProfile {
            year_min: first.make_year,
            year_max: first.make_year,
            price_min: first.price_usd,
            price_max: first.price_usd,
            owner_max: first.owner_count,
            brands: BTreeSet::new(),
            fuel_types: BTreeSet::new(),
            transmissions: BTreeSet::new(),
            service_histories: BTreeSet::new(),
        };

        for rec in records {
            profile.year_min = profile.year_min.min(rec.make_year);
            profile.year_max = profile.year_max.max(rec.make_year);
            profile.price_min = profile.price_min.min(rec.price_usd);
            profile.price_max = profile.price_max.max(rec.price_usd);
            profile.owner_max = profile.owner_max.max(rec.owner_count);
            profile.brands.insert(rec.brand.clone());
            profile.transmissions.insert(rec.transmission.clone());
            if let Some(fuel) = &rec.fuel_type {
                profile.fuel_types.insert(fuel.clone());
            }
            if let Some(service) = &rec.service_history {
                profile.service_histories.insert(service.clone());
            }
        }

        Some(profile)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("dataset contains no listings")]
    Empty,
}

/// The full loaded dataset. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    profile: DatasetProfile,
}

impl Dataset {
    /// Build the dataset and its profile from loaded records.
    pub fn from_records(records: Vec<Record>) -> Result<Self, DatasetError> {
        let profile = DatasetProfile::from_records(&records).ok_or(DatasetError::Empty)?;
        Ok(Dataset { records, profile })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn profile(&self) -> &DatasetProfile {
        &self.profile
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
