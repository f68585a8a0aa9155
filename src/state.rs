use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::Summary;
use crate::data::criteria::{CriteriaDraft, InvalidCriteria};
use crate::data::filter::{self, EmptyResult};
use crate::data::loader;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Outcome of one recomputation pass
// ---------------------------------------------------------------------------

/// Rows and aggregates for a selection that matched at least one listing.
#[derive(Debug, Clone)]
pub struct Matches {
    /// Row indices into the dataset, in dataset order.
    pub indices: Vec<usize>,
    pub summary: Summary,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Ready(Matches),
    /// Nothing matched; the dashboard shows a notice and nothing else.
    NoMatch,
    /// The widget values do not form valid criteria.
    Invalid(InvalidCriteria),
}

/// Validate `draft`, filter `dataset`, and aggregate the matches.
pub fn recompute(dataset: &Dataset, draft: &CriteriaDraft) -> Outcome {
    let criteria = match draft.validate(dataset.profile()) {
        Ok(criteria) => criteria,
        Err(e) => {
            log::warn!("Rejected filter selection: {e}");
            return Outcome::Invalid(e);
        }
    };

    match filter::apply(dataset, &criteria) {
        Ok(view) => Outcome::Ready(Matches {
            indices: view.indices().to_vec(),
            summary: Summary::compute(&view),
        }),
        Err(EmptyResult) => Outcome::NoMatch,
    }
}

// ---------------------------------------------------------------------------
// Session – one loaded dataset and its filter selections
// ---------------------------------------------------------------------------

/// Everything derived from one loaded dataset.
pub struct Session {
    /// Loaded once, never mutated.
    pub dataset: Arc<Dataset>,
    /// Current widget values.
    pub draft: CriteriaDraft,
    /// The draft `outcome` was computed from.
    applied: CriteriaDraft,
    pub outcome: Outcome,
    /// Scatter colours per fuel type.
    pub fuel_colors: ColorMap,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let draft = CriteriaDraft::from_profile(dataset.profile());
        let outcome = recompute(&dataset, &draft);
        let fuel_colors = ColorMap::new(&dataset.profile().fuel_types);
        Session {
            applied: draft.clone(),
            draft,
            outcome,
            fuel_colors,
            dataset,
        }
    }

    /// Recompute after a filter change. A no-op when nothing changed.
    pub fn refilter(&mut self) {
        if self.draft == self.applied {
            return;
        }
        self.outcome = recompute(&self.dataset, &self.draft);
        self.applied = self.draft.clone();
    }

    /// Restore the widest selections.
    pub fn reset_filters(&mut self) {
        self.draft = CriteriaDraft::from_profile(self.dataset.profile());
        self.refilter();
    }

    /// Toggle a single value in a multi-select filter.
    pub fn toggle(&mut self, field: MultiSelect, value: &str) {
        let selected = self.selection_mut(field);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every observed value of a multi-select filter.
    pub fn select_all(&mut self, field: MultiSelect) {
        let all = match field {
            MultiSelect::Brand => self.dataset.profile().brands.clone(),
            MultiSelect::Transmission => self.dataset.profile().transmissions.clone(),
        };
        *self.selection_mut(field) = all;
        self.refilter();
    }

    /// Deselect every value of a multi-select filter.
    pub fn select_none(&mut self, field: MultiSelect) {
        self.selection_mut(field).clear();
        self.refilter();
    }

    pub fn selection(&self, field: MultiSelect) -> &BTreeSet<String> {
        match field {
            MultiSelect::Brand => &self.draft.brands,
            MultiSelect::Transmission => &self.draft.transmissions,
        }
    }

    fn selection_mut(&mut self, field: MultiSelect) -> &mut BTreeSet<String> {
        match field {
            MultiSelect::Brand => &mut self.draft.brands,
            MultiSelect::Transmission => &mut self.draft.transmissions,
        }
    }
}

/// The multi-select filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSelect {
    Brand,
    Transmission,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// None until the user loads a file.
    pub session: Option<Session>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset with default filters.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.session = Some(Session::new(Arc::new(dataset)));
        self.status_message = None;
    }

    /// Load a dataset from disk, keeping the current one on failure.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
