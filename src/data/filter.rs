use thiserror::Error;

use super::criteria::FilterCriteria;
use super::model::{Dataset, DatasetError, Record};

// ---------------------------------------------------------------------------
// EmptyResult – no record passed the filters
// ---------------------------------------------------------------------------

/// Signalled instead of an empty view. Callers skip metrics, charts and the
/// table for this interaction and show a notice instead.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("no cars match the current filter selection")]
pub struct EmptyResult;

// ---------------------------------------------------------------------------
// FilteredView – matching rows, in dataset order
// ---------------------------------------------------------------------------

/// The records of a dataset that satisfy a [`FilterCriteria`], kept as
/// strictly increasing row indices into the dataset. Never empty.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always `false`: an empty match is reported as [`EmptyResult`].
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Row indices into the source dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Copy the matching records into a standalone dataset.
    pub fn to_dataset(&self) -> Result<Dataset, DatasetError> {
        Dataset::from_records(self.iter().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Whether a single record passes every constraint of `criteria`.
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    (criteria.year_min..=criteria.year_max).contains(&record.make_year)
        && criteria.brands.contains(&record.brand)
        && criteria.transmissions.contains(&record.transmission)
        && record.price_usd >= criteria.price_min
        && record.price_usd <= criteria.price_max
        && record.owner_count <= criteria.max_owners
        && criteria.fuel_type.admits(record.fuel_type.as_deref())
        && criteria.service_history.admits(record.service_history.as_deref())
}

/// Return the records of `dataset` that pass all filters, in dataset order.
///
/// A record passes when:
/// * `make_year` and `price_usd` lie inside their inclusive ranges
/// * `brand` and `transmission` are among the accepted sets
/// * `owner_count` does not exceed the owner limit
/// * fuel type and service history equal the selected category, unless that
///   filter is "All" (null never equals a category)
pub fn apply<'a>(
    dataset: &'a Dataset,
    criteria: &FilterCriteria,
) -> Result<FilteredView<'a>, EmptyResult> {
    let indices: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, criteria))
        .map(|(i, _)| i)
        .collect();

    log::debug!(
        "filter pass: {} of {} listings match",
        indices.len(),
        dataset.len()
    );

    if indices.is_empty() {
        return Err(EmptyResult);
    }
    Ok(FilteredView { dataset, indices })
}
