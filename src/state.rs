use std::sync::{Mutex, OnceLock};

use crate::data::error::{DataError, Result};
use crate::data::filter;
use crate::data::loader::{self, SourceConfig};
use crate::data::model::{Row, Table};

type LoadFn = Box<dyn Fn() -> Result<Table> + Send + Sync>;

// ---------------------------------------------------------------------------
// Job data service
// ---------------------------------------------------------------------------

/// Lazily loaded job table plus the queries run against it.
///
/// Construct one per process at the composition root and share it by
/// reference. The table is read on the first query (or an explicit
/// [`JobData::load`]) and kept for the lifetime of the value.
pub struct JobData {
    /// Reads the table; called until it first succeeds, never after.
    load_fn: LoadFn,

    /// Set exactly once, after a successful load.
    table: OnceLock<Table>,

    /// Serializes first loads so concurrent callers never read twice.
    init: Mutex<()>,

    /// Why the service is serving an empty stand-in table, if it is.
    unavailable: Option<String>,
}

impl JobData {
    /// Unloaded service reading from `source` on first use.
    pub fn new(source: SourceConfig) -> Self {
        Self::with_loader(move || loader::load_table(&source))
    }

    /// Unloaded service that obtains its table from `load_fn` on first use.
    pub fn with_loader<F>(load_fn: F) -> Self
    where
        F: Fn() -> Result<Table> + Send + Sync + 'static,
    {
        Self {
            load_fn: Box::new(load_fn),
            table: OnceLock::new(),
            init: Mutex::new(()),
            unavailable: None,
        }
    }

    /// Service over an already materialized table.
    pub fn from_table(table: Table) -> Self {
        Self {
            load_fn: Box::new(|| Ok(Table::empty())),
            table: OnceLock::from(table),
            init: Mutex::new(()),
            unavailable: None,
        }
    }

    /// Empty service standing in for a table that failed to load.
    ///
    /// Whole-table queries return nothing; column queries fail with
    /// [`DataError::Unavailable`] naming `cause`.
    pub fn unavailable(cause: &DataError) -> Self {
        Self {
            unavailable: Some(cause.to_string()),
            ..Self::from_table(Table::empty())
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Load the table now instead of on the first query.
    pub fn load(&self) -> Result<()> {
        self.ensure_loaded().map(|_| ())
    }

    /// Return the table, reading the source if this is the first call.
    ///
    /// A failed load leaves the service unloaded; the next call tries again.
    pub fn ensure_loaded(&self) -> Result<&Table> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        let _guard = self.init.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Another caller may have finished while we waited for the lock.
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        let table = (self.load_fn)().inspect_err(|e| {
            log::error!("Failed to load job data: {e}");
        })?;
        Ok(self.table.get_or_init(|| table))
    }

    /// Header columns in file order.
    pub fn columns(&self) -> Result<Vec<String>> {
        Ok(self.ensure_loaded()?.columns().to_vec())
    }

    /// Number of job rows.
    pub fn row_count(&self) -> Result<usize> {
        Ok(self.ensure_loaded()?.len())
    }

    /// Distinct values of `column`, sorted ascending.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<String>> {
        filter::distinct_values(self.ensure_loaded()?, column).map_err(|e| self.explain(e))
    }

    /// A copy of every row in file order.
    pub fn find_all(&self) -> Result<Vec<Row>> {
        Ok(self.ensure_loaded()?.rows().to_vec())
    }

    /// Rows whose `column` contains `term`, ignoring case.
    pub fn find_by_column_and_value(&self, column: &str, term: &str) -> Result<Vec<Row>> {
        let rows = filter::find_by_column_and_value(self.ensure_loaded()?, column, term)
            .map_err(|e| self.explain(e))?;
        log::debug!("{} rows match {column}~{term:?}", rows.len());
        Ok(rows)
    }

    /// Rows where any column contains `term`, ignoring case; no duplicates.
    pub fn find_by_value(&self, term: &str) -> Result<Vec<Row>> {
        let rows = filter::find_by_value(self.ensure_loaded()?, term);
        log::debug!("{} rows match {term:?} in any column", rows.len());
        Ok(rows)
    }

    /// On a stand-in table every column is missing because nothing loaded.
    fn explain(&self, err: DataError) -> DataError {
        match (err, &self.unavailable) {
            (DataError::MissingColumn(column), Some(reason)) => DataError::Unavailable {
                column,
                reason: reason.clone(),
            },
            (err, _) => err,
        }
    }
}
