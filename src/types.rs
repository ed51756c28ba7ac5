/// Record model for staff queries.
///
/// An [`Employee`] is an immutable value: fields are private and only
/// readable through accessors, which double as the key-extraction functions
/// every query component uses. Records enter the system as an
/// [`EmployeeDraft`] and become employees only after validation.
use crate::error::{StaffError, StaffResult};
use chrono::{Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Department an employee belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    /// Information technology
    It,
    /// Human resources
    Hr,
    /// Finance and accounting
    Finance,
    /// Marketing
    Marketing,
    /// Sales
    Sales,
    /// Operations
    Operations,
}

impl Department {
    /// Every department, in declaration order.
    pub const ALL: [Department; 6] = [
        Department::It,
        Department::Hr,
        Department::Finance,
        Department::Marketing,
        Department::Sales,
        Department::Operations,
    ];
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Department::It => write!(f, "IT"),
            Department::Hr => write!(f, "HR"),
            Department::Finance => write!(f, "FINANCE"),
            Department::Marketing => write!(f, "MARKETING"),
            Department::Sales => write!(f, "SALES"),
            Department::Operations => write!(f, "OPERATIONS"),
        }
    }
}

/// Position (seniority) of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    /// Trainee or intern
    Intern,
    /// Junior individual contributor
    Junior,
    /// Mid-level individual contributor
    Middle,
    /// Senior individual contributor
    Senior,
    /// Team or technical lead
    Lead,
    /// People manager
    Manager,
    /// Head of a department or function
    Director,
}

impl Position {
    /// Every position, from least to most senior.
    pub const ALL: [Position; 7] = [
        Position::Intern,
        Position::Junior,
        Position::Middle,
        Position::Senior,
        Position::Lead,
        Position::Manager,
        Position::Director,
    ];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Intern => write!(f, "INTERN"),
            Position::Junior => write!(f, "JUNIOR"),
            Position::Middle => write!(f, "MIDDLE"),
            Position::Senior => write!(f, "SENIOR"),
            Position::Lead => write!(f, "LEAD"),
            Position::Manager => write!(f, "MANAGER"),
            Position::Director => write!(f, "DIRECTOR"),
        }
    }
}

/// The instant a query run treats as "now".
///
/// Captured once and passed explicitly, so every tenure computation in one
/// run sees the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryClock {
    now: NaiveDateTime,
}

impl QueryClock {
    /// Capture the current local time.
    pub fn now() -> Self {
        Self {
            now: Local::now().naive_local(),
        }
    }

    /// Use a fixed instant (deterministic runs and tests).
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// The captured instant.
    pub fn instant(&self) -> NaiveDateTime {
        self.now
    }

    /// Whole years elapsed from `start` to the captured instant.
    ///
    /// A year counts only once its anniversary (month, day and time of day)
    /// has been reached. Starts at or after the captured instant yield zero.
    pub fn whole_years_since(&self, start: NaiveDateTime) -> u32 {
        if start >= self.now {
            return 0;
        }
        let mut years = self.now.year() - start.year();
        let reached = (self.now.month(), self.now.day(), self.now.time())
            >= (start.month(), start.day(), start.time());
        if !reached {
            years -= 1;
        }
        u32::try_from(years).unwrap_or(0)
    }
}

/// An immutable employee record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) age: u32,
    pub(crate) salary: f64,
    pub(crate) department: Department,
    pub(crate) position: Position,
    pub(crate) is_employer: bool,
    pub(crate) start_date: NaiveDateTime,
}

impl Employee {
    /// Unique id within a snapshot.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn department(&self) -> Department {
        self.department
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the employee is classified as an employer.
    pub fn is_employer(&self) -> bool {
        self.is_employer
    }

    /// Date of employment start.
    pub fn start_date(&self) -> NaiveDateTime {
        self.start_date
    }

    /// `name` and `surname` separated by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// `name` and `surname` separated by a comma.
    pub fn comma_name(&self) -> String {
        format!("{},{}", self.name, self.surname)
    }

    /// Whole years of service as of the given clock.
    pub fn tenure_years(&self, clock: &QueryClock) -> u32 {
        clock.whole_years_since(self.start_date)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} ({}, {}), age {}, salary {:.2}, {}, since {}",
            self.id,
            self.name,
            self.surname,
            self.department,
            self.position,
            self.age,
            self.salary,
            if self.is_employer { "employer" } else { "staff" },
            self.start_date.date()
        )
    }
}

/// Raw, unvalidated form of an employee as it appears in a roster.
///
/// `age` is signed so that a negative value is reported as an invalid record
/// rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub id: u32,
    pub name: String,
    pub surname: String,
    pub age: i64,
    pub salary: f64,
    pub department: Department,
    pub position: Position,
    #[serde(default)]
    pub is_employer: bool,
    pub start_date: NaiveDateTime,
}

impl EmployeeDraft {
    /// Start a draft with the identifying fields; the rest take neutral
    /// defaults and are filled in with the `with_*` setters.
    pub fn new(id: u32, name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            age: 0,
            salary: 0.0,
            department: Department::It,
            position: Position::Junior,
            is_employer: false,
            start_date: NaiveDateTime::default(),
        }
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = age;
        self
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.salary = salary;
        self
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.department = department;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn employer(mut self, is_employer: bool) -> Self {
        self.is_employer = is_employer;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDateTime) -> Self {
        self.start_date = start_date;
        self
    }

    /// Check the draft and turn it into an immutable [`Employee`].
    pub fn validate(self, clock: &QueryClock) -> StaffResult<Employee> {
        let id = self.id;
        let invalid = move |reason: String| StaffError::InvalidRecord { id, reason };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty".to_string()));
        }
        if self.surname.trim().is_empty() {
            return Err(invalid("surname is empty".to_string()));
        }
        let age = u32::try_from(self.age)
            .map_err(|_| invalid(format!("age {} is out of range", self.age)))?;
        if !self.salary.is_finite() || self.salary < 0.0 {
            return Err(invalid(format!("salary {} is not a non-negative number", self.salary)));
        }
        if self.start_date > clock.instant() {
            return Err(invalid(format!(
                "start date {} is in the future",
                self.start_date
            )));
        }

        Ok(Employee {
            id: self.id,
            name: self.name,
            surname: self.surname,
            age,
            salary: self.salary,
            department: self.department,
            position: self.position,
            is_employer: self.is_employer,
            start_date: self.start_date,
        })
    }
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            surname: employee.surname.clone(),
            age: i64::from(employee.age),
            salary: employee.salary,
            department: employee.department,
            position: employee.position,
            is_employer: employee.is_employer,
            start_date: employee.start_date,
        }
    }
}
