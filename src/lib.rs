//! # KoruStaff - Analytical Queries over Employee Records
//!
//! KoruStaff answers questions about a fixed, in-memory collection of
//! employee records: who earns the most, how many people work in each
//! department, who is the oldest in each team, what the payroll looks like
//! after a raise. Records are validated once when they are loaded and are
//! never modified afterwards.
//!
//! ## Quick Start
//!
//! ```
//! use koru_staff::prelude::*;
//!
//! // Capture "now" once and load the built-in roster
//! let snapshot = Snapshot::sample(QueryClock::now())?;
//!
//! // Named catalogue queries
//! let top = snapshot.highest_paid()?;
//! let headcount = snapshot.headcount_by_department();
//! assert_eq!(headcount[&Department::It], 3);
//!
//! // Or compose the engine directly
//! let seniors = select::filter(snapshot.employees(), |e| e.position() == Position::Senior);
//! let oldest = reduce::extreme_by(
//!     seniors.iter().copied(),
//!     &Comparator::comparing(Employee::age),
//!     Extreme::Max,
//! );
//! assert!(oldest.is_some());
//! assert!(top.salary() >= oldest.unwrap().salary());
//! # Ok::<(), koru_staff::StaffError>(())
//! ```
//!
//! ## Architecture
//!
//! KoruStaff is built in layers, leaf first:
//!
//! 1. **Record model** (`types`) - immutable [`Employee`] values and their keys
//! 2. **Selection** (`select`) - filter, project, distinct, stable sort, quantifiers
//! 3. **Reduction** (`reduce`) - sum, average, first-on-tie extremes, folds
//! 4. **Grouping** (`group`) - partitions, group-by with aggregators, keyed maps
//! 5. **Transforms** (`transform`) - derived records with one field replaced
//!
//! On top of these sit the [`Snapshot`] (records + clock + config) and the
//! query catalogue, which the `kstaff` binary exposes on the command line.
//!
//! ## Determinism
//!
//! Every query is a pure function of the snapshot. The only time-dependent
//! value, tenure, is computed against the [`QueryClock`] captured when the
//! snapshot was built, so repeated queries within one run agree. Extremes
//! resolve ties to the first record in roster order, and sorts are stable.

// Internal modules
mod error;
mod types;

// Query engine
pub mod group;
pub mod reduce;
pub mod select;
pub mod transform;

// Loading and run context
pub mod config;
pub mod roster;
pub mod snapshot;

// Named queries
pub mod catalogue;

// Public API exports
pub use catalogue::{QueryName, QueryOutput};
pub use config::CatalogueConfig;
pub use error::{StaffError, StaffResult};
pub use snapshot::Snapshot;
pub use types::{Department, Employee, EmployeeDraft, Position, QueryClock};

// Engine exports
pub use group::{
    Aggregator, AverageOf, Count, ExtremeOf, Partition, SumOf, keep_first, keep_last,
};
pub use reduce::{Extreme, Summary};
pub use select::{Comparator, SortOrder};

// Re-export commonly used external types for convenience
pub use chrono::NaiveDateTime;
pub use serde_json::{Value as JsonValue, json};

/// Prelude module for convenient imports.
///
/// Import everything you need with:
/// ```
/// use koru_staff::prelude::*;
/// ```
pub mod prelude {
    pub use crate::catalogue::{QueryName, QueryOutput};
    pub use crate::config::CatalogueConfig;
    pub use crate::error::{StaffError, StaffResult};
    pub use crate::snapshot::Snapshot;
    pub use crate::types::{Department, Employee, EmployeeDraft, Position, QueryClock};
    pub use chrono::NaiveDateTime;
    pub use serde_json::{Value as JsonValue, json};

    // Engine modules and types
    pub use crate::group::{self, AverageOf, Count, Partition, SumOf, keep_first, keep_last};
    pub use crate::reduce::{self, Extreme, Summary};
    pub use crate::select::{self, Comparator, SortOrder};
    pub use crate::transform;
}
