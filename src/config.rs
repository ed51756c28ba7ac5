/// Parameters for the query catalogue.
///
/// Every field has a default, so a config file only needs to name the
/// settings it changes:
///
/// ```json
/// { "min_age": 40, "focus_department": "FINANCE" }
/// ```
use crate::error::{StaffError, StaffResult};
use crate::types::Department;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Catalogue configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    /// Age threshold for "older than" filtering (default: 30)
    pub min_age: u32,

    /// Age every employee is checked against (default: 25)
    pub all_older_than: u32,

    /// Department singled out by per-department queries (default: IT)
    pub focus_department: Department,

    /// Multiplier applied by the salary raise (default: 1.1)
    pub raise_factor: f64,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            min_age: 30,
            all_older_than: 25,
            focus_department: Department::It,
            raise_factor: 1.1,
        }
    }
}

impl CatalogueConfig {
    pub fn with_min_age(mut self, min_age: u32) -> Self {
        self.min_age = min_age;
        self
    }

    pub fn with_all_older_than(mut self, age: u32) -> Self {
        self.all_older_than = age;
        self
    }

    pub fn with_focus_department(mut self, department: Department) -> Self {
        self.focus_department = department;
        self
    }

    pub fn with_raise_factor(mut self, factor: f64) -> Self {
        self.raise_factor = factor;
        self
    }

    /// Reject settings no query can work with.
    pub fn validate(&self) -> StaffResult<()> {
        if !self.raise_factor.is_finite() || self.raise_factor <= 0.0 {
            return Err(StaffError::InvalidConfig {
                reason: format!("raise_factor must be positive, got {}", self.raise_factor),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> StaffResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> StaffResult<Self> {
        let path = path.as_ref();
        debug!("Loading catalogue config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
