/// The catalogue of named staff queries.
///
/// Each query is a [`Snapshot`] method composed from the selection,
/// reduction, grouping and transform functions. [`QueryName`] lists them
/// all so callers (the `kstaff` binary, for one) can run a query by name and
/// get its result as JSON through [`Snapshot::run`].
///
/// # Example
///
/// ```
/// use koru_staff::{QueryClock, QueryName, Snapshot};
///
/// let snapshot = Snapshot::sample(QueryClock::now()).unwrap();
/// let top = snapshot.highest_paid().unwrap();
/// assert_eq!(top.full_name(), "Dmitri Ivanov");
///
/// let output = snapshot.run(QueryName::HeadcountByDepartment).unwrap();
/// assert_eq!(output.value["IT"], 3);
/// ```
use crate::error::{StaffError, StaffResult};
use crate::group::{self, AverageOf, Count, Partition, SumOf, keep_first, keep_last};
use crate::reduce::{self, Extreme};
use crate::select::{self, Comparator, SortOrder};
use crate::snapshot::Snapshot;
use crate::transform;
use crate::types::{Department, Employee, Position};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

impl Snapshot {
    /// Employees older than the configured minimum age.
    pub fn older_than_min_age(&self) -> Vec<&Employee> {
        let min_age = self.config().min_age;
        select::filter(self.employees(), |e| e.age() > min_age)
    }

    /// Every employee's first name, duplicates included.
    pub fn names(&self) -> Vec<&str> {
        select::project(self.employees(), Employee::name)
    }

    /// The best-paid employee; the earliest one if several share the top salary.
    pub fn highest_paid(&self) -> StaffResult<&Employee> {
        reduce::extreme_by(
            self.employees(),
            &Comparator::comparing(Employee::salary),
            Extreme::Max,
        )
        .ok_or_else(|| StaffError::empty("highest_paid"))
    }

    /// Mean salary, `None` for an empty snapshot.
    pub fn average_salary(&self) -> Option<f64> {
        reduce::average(self.employees(), Employee::salary)
    }

    /// Employees ordered by surname. Equal surnames keep roster order.
    pub fn by_surname(&self, order: SortOrder) -> Vec<&Employee> {
        let cmp = Comparator::from_fn(move |a: &Employee, b: &Employee| {
            order.apply(a.surname().cmp(b.surname()))
        });
        select::sort_by(self.employees(), &cmp)
    }

    /// Whether every employee is older than `all_older_than`.
    pub fn all_older_than(&self) -> bool {
        let age = self.config().all_older_than;
        select::all_match(self.employees(), |e| e.age() > age)
    }

    /// Whether anyone is older than `all_older_than`.
    pub fn any_older_than(&self) -> bool {
        let age = self.config().all_older_than;
        select::any_match(self.employees(), |e| e.age() > age)
    }

    /// First names of the employees in the focus department.
    pub fn focus_department_names(&self) -> Vec<&str> {
        let department = self.config().focus_department;
        let members = select::filter(self.employees(), |e| e.department() == department);
        select::project(members, Employee::name)
    }

    pub fn by_department(&self) -> BTreeMap<Department, Vec<&Employee>> {
        group::group_by(self.employees(), Employee::department)
    }

    pub fn headcount_by_department(&self) -> BTreeMap<Department, usize> {
        group::group_by_with(self.employees(), Employee::department, &Count)
    }

    /// Mean age per department.
    pub fn average_age_by_department(&self) -> BTreeMap<Department, f64> {
        group::group_by_with(
            self.employees(),
            Employee::department,
            &AverageOf(|e: &Employee| f64::from(e.age())),
        )
        .into_iter()
        .filter_map(|(department, avg)| avg.map(|avg| (department, avg)))
        .collect()
    }

    /// Employers in `matched`, everyone else in `unmatched`.
    pub fn employer_partition(&self) -> Partition<'_, Employee> {
        group::partition_by(self.employees(), Employee::is_employer)
    }

    /// Sum of all salaries.
    pub fn total_salary(&self) -> f64 {
        reduce::summarize(self.employees(), Employee::salary).sum
    }

    /// The lowest-paid employee; the earliest one if several share the lowest salary.
    pub fn lowest_paid(&self) -> StaffResult<&Employee> {
        reduce::extreme_by(
            self.employees(),
            &Comparator::comparing(Employee::salary),
            Extreme::Min,
        )
        .ok_or_else(|| StaffError::empty("lowest_paid"))
    }

    /// Distinct first names, in first-seen order.
    pub fn unique_names(&self) -> Vec<&str> {
        select::distinct_by(self.employees(), Employee::name)
    }

    /// First name to salary. Names are not unique; the later record wins.
    pub fn salary_by_name(&self) -> BTreeMap<&str, f64> {
        group::to_map_by(self.employees(), Employee::name, Employee::salary, keep_last)
    }

    pub fn non_employer_names(&self) -> Vec<&str> {
        let staff = select::filter(self.employees(), |e| !e.is_employer());
        select::project(staff, Employee::name)
    }

    pub fn full_names(&self) -> Vec<String> {
        select::project(self.employees(), Employee::full_name)
    }

    /// New records with every salary multiplied by the configured factor.
    pub fn raised_salaries(&self) -> Vec<Employee> {
        transform::raise_all(self.employees(), self.config().raise_factor)
    }

    /// Salary total of the focus department.
    pub fn focus_department_salary(&self) -> f64 {
        let department = self.config().focus_department;
        let members = select::filter(self.employees(), |e| e.department() == department);
        reduce::sum(members, Employee::salary)
    }

    pub fn salary_by_department(&self) -> BTreeMap<Department, f64> {
        group::group_by_with(
            self.employees(),
            Employee::department,
            &SumOf(Employee::salary),
        )
    }

    /// Employees paid strictly more than the mean salary.
    pub fn paid_above_average(&self) -> Vec<&Employee> {
        match self.average_salary() {
            Some(avg) => select::filter(self.employees(), |e| e.salary() > avg),
            None => Vec::new(),
        }
    }

    /// Records keyed by id.
    pub fn index_by_id(&self) -> BTreeMap<u32, &Employee> {
        // Ids are unique within a snapshot, so the merge never runs.
        group::to_map_by(self.employees(), Employee::id, |e| e, keep_first)
    }

    /// First names from the best paid down; equal salaries keep roster order.
    pub fn names_by_salary_desc(&self) -> Vec<&str> {
        let sorted = select::sort_by(
            self.employees(),
            &Comparator::by(Employee::salary, SortOrder::Desc),
        );
        select::project(sorted, Employee::name)
    }

    /// The oldest employee of each department, earliest on ties.
    pub fn oldest_by_department(&self) -> BTreeMap<Department, &Employee> {
        group::group_extreme_by(
            self.employees(),
            Employee::department,
            &Comparator::comparing(Employee::age),
            Extreme::Max,
        )
    }

    pub fn comma_names(&self) -> Vec<String> {
        select::project(self.employees(), Employee::comma_name)
    }

    /// One line of text per record.
    pub fn descriptions(&self) -> Vec<String> {
        select::project(self.employees(), |e| e.to_string())
    }

    /// Whole years of service summed over everyone.
    pub fn total_tenure_years(&self) -> u64 {
        let clock = self.clock();
        reduce::fold(self.employees(), 0_u64, |acc, e| {
            acc + u64::from(e.tenure_years(clock))
        })
    }

    /// The employee with the most whole years of service.
    pub fn longest_serving(&self) -> StaffResult<&Employee> {
        let clock = self.clock();
        reduce::extreme_by(
            self.employees(),
            &Comparator::comparing(|e: &Employee| e.tenure_years(clock)),
            Extreme::Max,
        )
        .ok_or_else(|| StaffError::empty("longest_serving"))
    }

    /// Salary total computed with an explicit fold.
    ///
    /// Unlike [`Snapshot::total_salary`], an empty snapshot has no combined
    /// total and is reported as [`StaffError::EmptyInput`].
    pub fn combined_salary(&self) -> StaffResult<f64> {
        if self.is_empty() {
            return Err(StaffError::empty("combined_salary"));
        }
        Ok(reduce::fold(self.employees(), 0.0, |acc, e| acc + e.salary()))
    }

    pub fn headcount_by_position(&self) -> BTreeMap<Position, usize> {
        group::group_by_with(self.employees(), Employee::position, &Count)
    }

    /// Run a catalogue query by name and render its result as JSON.
    pub fn run(&self, query: QueryName) -> StaffResult<QueryOutput> {
        debug!("Running query '{}' over {} employees", query, self.len());

        let value = match query {
            QueryName::OlderThan => to_json(self.older_than_min_age())?,
            QueryName::Names => to_json(self.names())?,
            QueryName::HighestPaid => to_json(self.highest_paid()?)?,
            QueryName::AverageSalary => to_json(self.average_salary())?,
            QueryName::BySurname => json!({
                "asc": to_json(self.by_surname(SortOrder::Asc))?,
                "desc": to_json(self.by_surname(SortOrder::Desc))?,
            }),
            QueryName::AllOlderThan => to_json(self.all_older_than())?,
            QueryName::FocusDepartmentNames => to_json(self.focus_department_names())?,
            QueryName::ByDepartment => to_json(self.by_department())?,
            QueryName::HeadcountByDepartment => to_json(self.headcount_by_department())?,
            QueryName::AverageAgeByDepartment => to_json(self.average_age_by_department())?,
            QueryName::EmployerPartition => {
                let split = self.employer_partition();
                json!({
                    "true": to_json(&split.matched)?,
                    "false": to_json(&split.unmatched)?,
                })
            }
            QueryName::TotalSalary => to_json(self.total_salary())?,
            QueryName::LowestPaid => to_json(self.lowest_paid()?)?,
            QueryName::UniqueNames => to_json(self.unique_names())?,
            QueryName::SalaryByName => to_json(self.salary_by_name())?,
            QueryName::NonEmployerNames => to_json(self.non_employer_names())?,
            QueryName::FullNames => to_json(self.full_names())?,
            QueryName::RaisedSalaries => to_json(self.raised_salaries())?,
            QueryName::FocusDepartmentSalary => to_json(self.focus_department_salary())?,
            QueryName::SalaryByDepartment => to_json(self.salary_by_department())?,
            QueryName::PaidAboveAverage => to_json(self.paid_above_average())?,
            QueryName::IndexById => to_json(self.index_by_id())?,
            QueryName::NamesBySalaryDesc => to_json(self.names_by_salary_desc())?,
            QueryName::OldestByDepartment => to_json(self.oldest_by_department())?,
            QueryName::CommaNames => to_json(self.comma_names())?,
            QueryName::Descriptions => to_json(self.descriptions())?,
            QueryName::TotalTenure => to_json(self.total_tenure_years())?,
            QueryName::LongestServing => to_json(self.longest_serving()?)?,
            QueryName::CombinedSalary => to_json(self.combined_salary()?)?,
            QueryName::HeadcountByPosition => to_json(self.headcount_by_position())?,
        };

        Ok(QueryOutput { query, value })
    }
}

fn to_json<S: Serialize>(value: S) -> StaffResult<JsonValue> {
    Ok(serde_json::to_value(value)?)
}

/// Result of [`Snapshot::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutput {
    /// The query that produced this output.
    pub query: QueryName,
    /// The query result.
    pub value: JsonValue,
}

/// Name of a catalogue query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryName {
    OlderThan,
    Names,
    HighestPaid,
    AverageSalary,
    BySurname,
    AllOlderThan,
    FocusDepartmentNames,
    ByDepartment,
    HeadcountByDepartment,
    AverageAgeByDepartment,
    EmployerPartition,
    TotalSalary,
    LowestPaid,
    UniqueNames,
    SalaryByName,
    NonEmployerNames,
    FullNames,
    RaisedSalaries,
    FocusDepartmentSalary,
    SalaryByDepartment,
    PaidAboveAverage,
    IndexById,
    NamesBySalaryDesc,
    OldestByDepartment,
    CommaNames,
    Descriptions,
    TotalTenure,
    LongestServing,
    CombinedSalary,
    HeadcountByPosition,
}

impl QueryName {
    /// Every catalogue query, in catalogue order.
    pub const ALL: [QueryName; 30] = [
        QueryName::OlderThan,
        QueryName::Names,
        QueryName::HighestPaid,
        QueryName::AverageSalary,
        QueryName::BySurname,
        QueryName::AllOlderThan,
        QueryName::FocusDepartmentNames,
        QueryName::ByDepartment,
        QueryName::HeadcountByDepartment,
        QueryName::AverageAgeByDepartment,
        QueryName::EmployerPartition,
        QueryName::TotalSalary,
        QueryName::LowestPaid,
        QueryName::UniqueNames,
        QueryName::SalaryByName,
        QueryName::NonEmployerNames,
        QueryName::FullNames,
        QueryName::RaisedSalaries,
        QueryName::FocusDepartmentSalary,
        QueryName::SalaryByDepartment,
        QueryName::PaidAboveAverage,
        QueryName::IndexById,
        QueryName::NamesBySalaryDesc,
        QueryName::OldestByDepartment,
        QueryName::CommaNames,
        QueryName::Descriptions,
        QueryName::TotalTenure,
        QueryName::LongestServing,
        QueryName::CombinedSalary,
        QueryName::HeadcountByPosition,
    ];

    /// The kebab-case name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryName::OlderThan => "older-than",
            QueryName::Names => "names",
            QueryName::HighestPaid => "highest-paid",
            QueryName::AverageSalary => "average-salary",
            QueryName::BySurname => "by-surname",
            QueryName::AllOlderThan => "all-older-than",
            QueryName::FocusDepartmentNames => "focus-department-names",
            QueryName::ByDepartment => "by-department",
            QueryName::HeadcountByDepartment => "headcount-by-department",
            QueryName::AverageAgeByDepartment => "average-age-by-department",
            QueryName::EmployerPartition => "employer-partition",
            QueryName::TotalSalary => "total-salary",
            QueryName::LowestPaid => "lowest-paid",
            QueryName::UniqueNames => "unique-names",
            QueryName::SalaryByName => "salary-by-name",
            QueryName::NonEmployerNames => "non-employer-names",
            QueryName::FullNames => "full-names",
            QueryName::RaisedSalaries => "raised-salaries",
            QueryName::FocusDepartmentSalary => "focus-department-salary",
            QueryName::SalaryByDepartment => "salary-by-department",
            QueryName::PaidAboveAverage => "paid-above-average",
            QueryName::IndexById => "index-by-id",
            QueryName::NamesBySalaryDesc => "names-by-salary-desc",
            QueryName::OldestByDepartment => "oldest-by-department",
            QueryName::CommaNames => "comma-names",
            QueryName::Descriptions => "descriptions",
            QueryName::TotalTenure => "total-tenure",
            QueryName::LongestServing => "longest-serving",
            QueryName::CombinedSalary => "combined-salary",
            QueryName::HeadcountByPosition => "headcount-by-position",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            QueryName::OlderThan => "Employees older than the configured minimum age",
            QueryName::Names => "First names of all employees",
            QueryName::HighestPaid => "Employee with the highest salary",
            QueryName::AverageSalary => "Average salary",
            QueryName::BySurname => "Employees sorted by surname, ascending and descending",
            QueryName::AllOlderThan => "Whether every employee is older than the configured age",
            QueryName::FocusDepartmentNames => "First names in the focus department",
            QueryName::ByDepartment => "Employees grouped by department",
            QueryName::HeadcountByDepartment => "Number of employees per department",
            QueryName::AverageAgeByDepartment => "Average age per department",
            QueryName::EmployerPartition => "Employers and non-employers",
            QueryName::TotalSalary => "Sum of all salaries",
            QueryName::LowestPaid => "Employee with the lowest salary",
            QueryName::UniqueNames => "Distinct first names",
            QueryName::SalaryByName => "First name to salary, later records winning",
            QueryName::NonEmployerNames => "First names of non-employers",
            QueryName::FullNames => "Full names",
            QueryName::RaisedSalaries => "All employees with the configured raise applied",
            QueryName::FocusDepartmentSalary => "Salary total of the focus department",
            QueryName::SalaryByDepartment => "Salary total per department",
            QueryName::PaidAboveAverage => "Employees paid above the average salary",
            QueryName::IndexById => "Employees keyed by id",
            QueryName::NamesBySalaryDesc => "First names from highest to lowest salary",
            QueryName::OldestByDepartment => "Oldest employee in each department",
            QueryName::CommaNames => "Name and surname joined by a comma",
            QueryName::Descriptions => "One-line description of every employee",
            QueryName::TotalTenure => "Total whole years of service",
            QueryName::LongestServing => "Employee with the longest service",
            QueryName::CombinedSalary => "Salary total via an explicit fold",
            QueryName::HeadcountByPosition => "Number of employees per position",
        }
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryName {
    type Err = StaffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryName::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| StaffError::UnknownQuery(s.to_string()))
    }
}
