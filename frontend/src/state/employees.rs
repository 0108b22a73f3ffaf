use std::cmp::Ordering;
use std::collections::BTreeSet;

use leptos::*;
use log::{debug, warn};

use crate::{
    api::{ApiClient, ApiError, EmployeeListing, EmployeePayload, EmployeeRecord},
    state::fetch::{FetchPhase, FetchToken, RequestGeneration},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Email,
    Department,
    HireDate,
    Salary,
}

impl SortField {
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Employee",
            SortField::Email => "Email",
            SortField::Department => "Department",
            SortField::HireDate => "Hire Date",
            SortField::Salary => "Salary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Same field flips the direction; a new field starts ascending.
    pub fn select(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.toggled(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Ascending order on a single field. Missing hire dates sort first and
/// missing salaries count as zero.
pub fn compare_by(field: SortField, a: &EmployeeRecord, b: &EmployeeRecord) -> Ordering {
    match field {
        SortField::Name => compare_text(&a.name, &b.name),
        SortField::Email => compare_text(&a.email, &b.email),
        SortField::Department => compare_text(&a.department, &b.department),
        SortField::HireDate => a.hire_date.cmp(&b.hire_date),
        SortField::Salary => a.salary_or_zero().total_cmp(&b.salary_or_zero()),
    }
}

/// Stable: records with equal keys keep their input order in both directions.
pub fn sort_employees(records: &mut [EmployeeRecord], spec: SortSpec) {
    records.sort_by(|a, b| {
        let ordering = compare_by(spec.field, a, b);
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// What the employee table shows. Rebuilt from the loaded set, the active
/// search and the sort selection; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeListState {
    pub loaded: Vec<EmployeeRecord>,
    pub search_results: Option<Vec<EmployeeRecord>>,
    pub query: String,
    pub sort: SortSpec,
    pub expanded: BTreeSet<i64>,
    pub deleting: BTreeSet<i64>,
    pub load_phase: FetchPhase,
    pub search_phase: FetchPhase,
    /// Set while the loaded set is the built-in sample data.
    pub sample_reason: Option<String>,
    load_generation: RequestGeneration,
    search_generation: RequestGeneration,
}

impl EmployeeListState {
    pub fn begin_load(&mut self) -> FetchToken {
        self.load_phase = FetchPhase::Loading;
        self.load_generation.next()
    }

    /// Replaces the loaded set on success. A failure keeps the previous set.
    /// Returns `false` when the token has been superseded.
    pub fn finish_load(
        &mut self,
        token: FetchToken,
        result: Result<EmployeeListing, ApiError>,
    ) -> bool {
        if !self.load_generation.is_current(token) {
            debug!("Discarding stale employee listing");
            return false;
        }
        match result {
            Ok(listing) => {
                self.loaded = listing.records;
                self.sample_reason = listing.sample_reason;
                self.load_phase = FetchPhase::Loaded;
                self.prune_row_state();
            }
            Err(error) => self.load_phase = FetchPhase::Error(error.error),
        }
        true
    }

    /// Starts a search for a non-blank query. A blank query clears the
    /// filter and returns `None`.
    pub fn set_query(&mut self, query: &str) -> Option<FetchToken> {
        let query = query.trim();
        if query.is_empty() {
            self.clear_query();
            return None;
        }
        self.query = query.to_string();
        self.search_phase = FetchPhase::Loading;
        Some(self.search_generation.next())
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.search_results = None;
        self.search_phase = FetchPhase::Idle;
        self.search_generation.invalidate();
    }

    pub fn finish_search(
        &mut self,
        token: FetchToken,
        result: Result<Vec<EmployeeRecord>, ApiError>,
    ) -> bool {
        if !self.search_generation.is_current(token) {
            debug!("Discarding stale search results");
            return false;
        }
        match result {
            Ok(records) => {
                self.search_results = Some(records);
                self.search_phase = FetchPhase::Loaded;
            }
            Err(error) => self.search_phase = FetchPhase::Error(error.error),
        }
        true
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Search results while a query is active, the full listing otherwise.
    pub fn base_set(&self) -> &[EmployeeRecord] {
        match (&self.search_results, self.has_query()) {
            (Some(results), true) => results,
            _ => &self.loaded,
        }
    }

    pub fn visible(&self) -> Vec<EmployeeRecord> {
        let mut records = self.base_set().to_vec();
        sort_employees(&mut records, self.sort);
        records
    }

    pub fn select_sort(&mut self, field: SortField) {
        self.sort = self.sort.select(field);
    }

    /// Returns whether the row is expanded afterwards. Several rows may be
    /// open at once.
    pub fn toggle_expanded(&mut self, id: i64) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    /// `false` when a delete for this row is already in flight.
    pub fn begin_delete(&mut self, id: i64) -> bool {
        self.deleting.insert(id)
    }

    pub fn finish_delete(&mut self, id: i64) {
        self.deleting.remove(&id);
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(&id)
    }

    /// Swaps in a record returned by the backend after an update.
    pub fn replace_record(&mut self, record: EmployeeRecord) {
        let sets = std::iter::once(&mut self.loaded).chain(self.search_results.as_mut());
        for set in sets {
            if let Some(slot) = set.iter_mut().find(|r| r.id == record.id) {
                *slot = record.clone();
            }
        }
    }

    pub fn is_sample(&self) -> bool {
        self.sample_reason.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.load_phase.is_loading() || self.search_phase.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        if self.has_query() {
            self.search_phase.error()
        } else {
            self.load_phase.error()
        }
    }

    fn prune_row_state(&mut self) {
        let known: BTreeSet<i64> = self
            .loaded
            .iter()
            .chain(self.search_results.iter().flatten())
            .map(|r| r.id)
            .collect();
        self.expanded.retain(|id| known.contains(id));
    }
}

/// Initial load or reload. Results are dropped when the state has been
/// disposed or a newer load started meanwhile.
pub async fn load_employees(
    api: &ApiClient,
    state: RwSignal<EmployeeListState>,
) -> Result<(), ApiError> {
    let Some(token) = state.try_update(|s| s.begin_load()) else {
        return Ok(());
    };
    let result = api.employee_listing().await;
    let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
    state.try_update(|s| s.finish_load(token, result));
    outcome
}

/// Blank queries restore the loaded set without touching the backend.
pub async fn search_employees(
    api: &ApiClient,
    state: RwSignal<EmployeeListState>,
    query: String,
) -> Result<(), ApiError> {
    let Some(token) = state.try_update(|s| s.set_query(&query)).flatten() else {
        return Ok(());
    };
    let result = api.search_employees(&query).await;
    let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
    state.try_update(|s| s.finish_search(token, result));
    outcome
}

/// Deletes, then reloads on success. A failed delete leaves the state as it
/// was and hands the error back to the caller. Once the delete went through
/// the result is `Ok`; a failing reload only shows up in the fetch phases.
pub async fn delete_employee(
    api: &ApiClient,
    state: RwSignal<EmployeeListState>,
    id: i64,
) -> Result<(), ApiError> {
    if !state.try_update(|s| s.begin_delete(id)).unwrap_or(false) {
        return Ok(());
    }
    let result = api.delete_employee(id).await;
    state.try_update(|s| s.finish_delete(id));
    result?;

    if let Err(err) = load_employees(api, state).await {
        warn!("Reload after deleting employee {} failed: {}", id, err);
    }
    let query = state
        .try_with_untracked(|s| s.query.clone())
        .unwrap_or_default();
    if !query.is_empty() {
        if let Err(err) = search_employees(api, state, query).await {
            warn!("Search refresh after deleting employee {} failed: {}", id, err);
        }
    }
    Ok(())
}

pub async fn update_employee(
    api: &ApiClient,
    state: RwSignal<EmployeeListState>,
    id: i64,
    payload: EmployeePayload,
) -> Result<EmployeeRecord, ApiError> {
    let record = api.update_employee(id, &payload).await?;
    state.try_update(|s| s.replace_record(record.clone()));
    Ok(record)
}
