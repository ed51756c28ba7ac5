/// Derived-record transforms.
///
/// Records are never changed in place. A transform builds a new
/// [`Employee`] that shares every field with its source except the one being
/// replaced, and batch transforms produce a new collection.
use crate::types::Employee;

impl Employee {
    /// A copy of this record with `salary` replaced.
    ///
    /// The new value is taken as given; it is the caller's job to pass a
    /// sensible salary.
    pub fn with_salary(&self, salary: f64) -> Employee {
        Employee {
            salary,
            ..self.clone()
        }
    }
}

/// New records with each salary replaced by `adjust(record)`.
pub fn adjust_salaries<'a, I, F>(employees: I, adjust: F) -> Vec<Employee>
where
    I: IntoIterator<Item = &'a Employee>,
    F: Fn(&Employee) -> f64,
{
    employees
        .into_iter()
        .map(|e| e.with_salary(adjust(e)))
        .collect()
}

/// New records with every salary multiplied by `factor`.
///
/// `raise_all(snapshot, 1.1)` is the 10% raise.
pub fn raise_all<'a, I>(employees: I, factor: f64) -> Vec<Employee>
where
    I: IntoIterator<Item = &'a Employee>,
{
    adjust_salaries(employees, |e| e.salary() * factor)
}
