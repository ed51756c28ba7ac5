/// The immutable input of a query run.
///
/// A [`Snapshot`] bundles the validated records with the clock captured for
/// the run and the catalogue parameters. It hands out shared references
/// only, so any number of queries can read it at once.
use crate::config::CatalogueConfig;
use crate::error::{StaffError, StaffResult};
use crate::roster;
use crate::types::{Employee, QueryClock};
use std::collections::HashSet;
use tracing::debug;

/// Fixed collection of employees plus the context queries run in.
#[derive(Debug, Clone)]
pub struct Snapshot {
    employees: Vec<Employee>,
    clock: QueryClock,
    config: CatalogueConfig,
}

impl Snapshot {
    /// Build a snapshot, checking that ids are unique and that nobody
    /// starts after the snapshot's clock.
    pub fn new(employees: Vec<Employee>, clock: QueryClock) -> StaffResult<Self> {
        let mut ids = HashSet::with_capacity(employees.len());
        if let Some(dup) = employees.iter().find(|e| !ids.insert(e.id())) {
            return Err(StaffError::DuplicateId(dup.id()));
        }
        if let Some(late) = employees
            .iter()
            .find(|e| e.start_date() > clock.instant())
        {
            return Err(StaffError::InvalidRecord {
                id: late.id(),
                reason: format!(
                    "start date {} is after the snapshot clock {}",
                    late.start_date(),
                    clock.instant()
                ),
            });
        }

        debug!(
            "Snapshot of {} employees taken at {}",
            employees.len(),
            clock.instant()
        );
        Ok(Self {
            employees,
            clock,
            config: CatalogueConfig::default(),
        })
    }

    /// Snapshot of the built-in demonstration roster.
    pub fn sample(clock: QueryClock) -> StaffResult<Self> {
        Self::new(roster::sample_roster(&clock)?, clock)
    }

    /// Replace the catalogue parameters.
    pub fn with_config(mut self, config: CatalogueConfig) -> Self {
        self.config = config;
        self
    }

    /// All records, in roster order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// The clock captured for this run.
    pub fn clock(&self) -> &QueryClock {
        &self.clock
    }

    pub fn config(&self) -> &CatalogueConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
