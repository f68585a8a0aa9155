use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use super::model::DatasetProfile;

// ---------------------------------------------------------------------------
// Restriction – single-category selector with an "All" sentinel
// ---------------------------------------------------------------------------

/// Selection for a single-choice categorical filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Restriction {
    /// No restriction ("All").
    #[default]
    Any,
    /// Only records whose value equals this category exactly.
    Only(String),
}

impl Restriction {
    /// Null values never match a specific category.
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Restriction::Any => true,
            Restriction::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::Any => write!(f, "All"),
            Restriction::Only(category) => write!(f, "{category}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidCriteria {
    #[error("model year range is inverted ({lower} > {upper})")]
    YearRange { lower: i32, upper: i32 },
    #[error("price range is inverted ({lower} > {upper})")]
    PriceRange { lower: f64, upper: f64 },
    #[error("price bounds must be finite numbers")]
    NonFinitePrice,
    #[error("maximum owner count must be at least 1, got {0}")]
    OwnerLimit(u32),
    #[error("select at least one {0}")]
    EmptySelection(&'static str),
    #[error("{field} '{value}' does not occur in the dataset")]
    UnknownCategory { field: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// FilterCriteria – validated selections
// ---------------------------------------------------------------------------

/// The validated set of constraints handed to the filter engine.
///
/// Obtainable only through [`FilterCriteria::defaults`] or
/// [`CriteriaDraft::validate`], so every bound pair is ordered and every
/// category was observed in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub(crate) year_min: i32,
    pub(crate) year_max: i32,
    pub(crate) brands: BTreeSet<String>,
    pub(crate) fuel_type: Restriction,
    pub(crate) transmissions: BTreeSet<String>,
    pub(crate) price_min: f64,
    pub(crate) price_max: f64,
    pub(crate) max_owners: u32,
    pub(crate) service_history: Restriction,
}

impl FilterCriteria {
    /// Selections that admit every record of the profiled dataset.
    pub fn defaults(profile: &DatasetProfile) -> Self {
        let draft = CriteriaDraft::from_profile(profile);
        FilterCriteria {
            year_min: draft.year_min,
            year_max: draft.year_max,
            brands: draft.brands,
            fuel_type: Restriction::Any,
            transmissions: draft.transmissions,
            price_min: draft.price_min,
            price_max: draft.price_max,
            max_owners: draft.max_owners,
            service_history: Restriction::Any,
        }
    }
}

// ---------------------------------------------------------------------------
// CriteriaDraft – raw widget values
// ---------------------------------------------------------------------------

/// Unvalidated selections as collected by the filter widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaDraft {
    pub year_min: i32,
    pub year_max: i32,
    pub brands: BTreeSet<String>,
    pub fuel_type: Restriction,
    pub transmissions: BTreeSet<String>,
    pub price_min: f64,
    pub price_max: f64,
    pub max_owners: u32,
    pub service_history: Restriction,
}

impl CriteriaDraft {
    /// Widest selections for the profiled dataset.
    ///
    /// The price bounds are widened outward to whole cents so that slider
    /// rounding can never exclude the cheapest or most expensive listing.
    pub fn from_profile(profile: &DatasetProfile) -> Self {
        let (price_min, price_max) = Self::price_bounds(profile);
        CriteriaDraft {
            year_min: profile.year_min,
            year_max: profile.year_max,
            brands: profile.brands.clone(),
            fuel_type: Restriction::Any,
            transmissions: profile.transmissions.clone(),
            price_min,
            price_max,
            max_owners: profile.owner_max.max(1),
            service_history: Restriction::Any,
        }
    }

    /// Observed price range widened outward to whole cents.
    pub fn price_bounds(profile: &DatasetProfile) -> (f64, f64) {
        (floor_cents(profile.price_min), ceil_cents(profile.price_max))
    }

    /// Check every invariant and freeze the draft into [`FilterCriteria`].
    pub fn validate(&self, profile: &DatasetProfile) -> Result<FilterCriteria, InvalidCriteria> {
        if self.year_min > self.year_max {
            return Err(InvalidCriteria::YearRange {
                lower: self.year_min,
                upper: self.year_max,
            });
        }
        if !self.price_min.is_finite() || !self.price_max.is_finite() {
            return Err(InvalidCriteria::NonFinitePrice);
        }
        if self.price_min > self.price_max {
            return Err(InvalidCriteria::PriceRange {
                lower: self.price_min,
                upper: self.price_max,
            });
        }
        if self.max_owners < 1 {
            return Err(InvalidCriteria::OwnerLimit(self.max_owners));
        }

        check_selection("brand", &self.brands, &profile.brands)?;
        check_selection("transmission", &self.transmissions, &profile.transmissions)?;
        check_restriction("fuel type", &self.fuel_type, &profile.fuel_types)?;
        check_restriction("service history", &self.service_history, &profile.service_histories)?;

        Ok(FilterCriteria {
            year_min: self.year_min,
            year_max: self.year_max,
            brands: self.brands.clone(),
            fuel_type: self.fuel_type.clone(),
            transmissions: self.transmissions.clone(),
            price_min: self.price_min,
            price_max: self.price_max,
            max_owners: self.max_owners,
            service_history: self.service_history.clone(),
        })
    }
}

fn check_selection(
    field: &'static str,
    selected: &BTreeSet<String>,
    observed: &BTreeSet<String>,
) -> Result<(), InvalidCriteria> {
    if selected.is_empty() {
        return Err(InvalidCriteria::EmptySelection(field));
    }
    match selected.difference(observed).next() {
        Some(unknown) => Err(InvalidCriteria::UnknownCategory {
            field,
            value: unknown.clone(),
        }),
        None => Ok(()),
    }
}

fn check_restriction(
    field: &'static str,
    restriction: &Restriction,
    observed: &BTreeSet<String>,
) -> Result<(), InvalidCriteria> {
    match restriction {
        Restriction::Only(value) if !observed.contains(value) => {
            Err(InvalidCriteria::UnknownCategory {
                field,
                value: value.clone(),
            })
        }
        _ => Ok(()),
    }
}

fn floor_cents(value: f64) -> f64 {
    ((value * 100.0).floor() / 100.0).min(value)
}

fn ceil_cents(value: f64) -> f64 {
    ((value * 100.0).ceil() / 100.0).max(value)
}
