/// Roster loading and validation.
///
/// A roster is a JSON array of [`EmployeeDraft`] objects. Loading validates
/// every draft against the run's [`QueryClock`] and checks that ids are
/// unique, so the rest of the crate can assume clean records.
///
/// ```json
/// [
///   {
///     "id": 1,
///     "name": "Ann",
///     "surname": "Kowalski",
///     "age": 34,
///     "salary": 5200.0,
///     "department": "IT",
///     "position": "SENIOR",
///     "is_employer": false,
///     "start_date": "2016-03-01T00:00:00"
///   }
/// ]
/// ```
use crate::error::{StaffError, StaffResult};
use crate::types::{Employee, EmployeeDraft, QueryClock};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// The built-in demonstration roster.
pub const SAMPLE_ROSTER_JSON: &str = include_str!("../data/sample_roster.json");

/// Validate drafts into employees, rejecting the whole roster on the first
/// bad record or repeated id.
pub fn from_drafts(drafts: Vec<EmployeeDraft>, clock: &QueryClock) -> StaffResult<Vec<Employee>> {
    let mut seen = HashSet::with_capacity(drafts.len());
    let mut employees = Vec::with_capacity(drafts.len());

    for draft in drafts {
        if !seen.insert(draft.id) {
            warn!("Rejecting roster: duplicate id {}", draft.id);
            return Err(StaffError::DuplicateId(draft.id));
        }
        let employee = draft.validate(clock).inspect_err(|e| {
            warn!("Rejecting roster: {}", e);
        })?;
        employees.push(employee);
    }

    debug!("Validated {} roster records", employees.len());
    Ok(employees)
}

/// Parse and validate a JSON roster document.
pub fn from_json_str(json: &str, clock: &QueryClock) -> StaffResult<Vec<Employee>> {
    let drafts: Vec<EmployeeDraft> = serde_json::from_str(json)?;
    from_drafts(drafts, clock)
}

/// Read, parse and validate a JSON roster file.
pub fn load_from_path(path: impl AsRef<Path>, clock: &QueryClock) -> StaffResult<Vec<Employee>> {
    let path = path.as_ref();
    debug!("Loading roster from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    from_json_str(&json, clock)
}

/// The built-in demonstration roster, validated against `clock`.
pub fn sample_roster(clock: &QueryClock) -> StaffResult<Vec<Employee>> {
    from_json_str(SAMPLE_ROSTER_JSON, clock)
}

/// Render employees as a JSON roster that [`from_json_str`] accepts.
pub fn to_json_string(employees: &[Employee]) -> StaffResult<String> {
    Ok(serde_json::to_string_pretty(employees)?)
}
