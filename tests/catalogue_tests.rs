/// Integration tests for the query catalogue.
///
/// All tests run against the built-in sample roster with the clock pinned
/// to 2024-06-15 09:00, so tenure values are fixed.
use chrono::NaiveDate;
use koru_staff::prelude::*;

fn clock() -> QueryClock {
    QueryClock::at(
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    )
}

fn sample() -> Snapshot {
    Snapshot::sample(clock()).unwrap()
}

fn ids(records: &[&Employee]) -> Vec<u32> {
    records.iter().map(|e| e.id()).collect()
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn older_than_default_threshold() {
    let snapshot = sample();
    assert_eq!(
        ids(&snapshot.older_than_min_age()),
        vec![1, 3, 4, 5, 7, 8, 9, 11, 12]
    );
}

#[test]
fn older_than_follows_config() {
    let snapshot = sample().with_config(CatalogueConfig::default().with_min_age(50));
    assert_eq!(ids(&snapshot.older_than_min_age()), vec![5, 11]);
}

#[test]
fn names_keep_duplicates_and_order() {
    let snapshot = sample();
    let names = snapshot.names();
    assert_eq!(names.len(), 12);
    assert_eq!(&names[..4], &["Ann", "Bob", "Carla", "Ann"]);
}

#[test]
fn surname_sort_is_stable_both_ways() {
    let snapshot = sample();
    assert_eq!(
        ids(&snapshot.by_surname(SortOrder::Asc)),
        vec![11, 10, 7, 5, 1, 8, 9, 3, 6, 2, 12, 4]
    );
    // The two Nowaks (2 and 12) keep roster order in descending order too.
    assert_eq!(
        ids(&snapshot.by_surname(SortOrder::Desc)),
        vec![4, 2, 12, 6, 3, 9, 8, 1, 5, 7, 10, 11]
    );
}

#[test]
fn age_quantifiers() {
    let snapshot = sample();
    assert!(snapshot.all_older_than());
    assert!(snapshot.any_older_than());

    let strict = sample().with_config(CatalogueConfig::default().with_all_older_than(26));
    assert!(!strict.all_older_than());
}

#[test]
fn focus_department_names() {
    assert_eq!(sample().focus_department_names(), vec!["Ann", "Bob", "Jonas"]);

    let finance = sample()
        .with_config(CatalogueConfig::default().with_focus_department(Department::Finance));
    assert_eq!(finance.focus_department_names(), vec!["Carla", "Greta"]);
}

#[test]
fn unique_names_collapse_repeats() {
    let snapshot = sample();
    let unique = snapshot.unique_names();
    assert_eq!(unique.len(), 11);
    assert_eq!(unique.iter().filter(|n| **n == "Ann").count(), 1);
}

#[test]
fn non_employer_names() {
    assert_eq!(
        sample().non_employer_names(),
        vec!["Ann", "Bob", "Ann", "Eva", "Farid", "Greta", "Hugo", "Ines"]
    );
}

#[test]
fn derived_names() {
    let snapshot = sample();
    assert_eq!(snapshot.full_names()[0], "Ann Kowalski");
    assert_eq!(snapshot.comma_names()[4], "Dmitri,Ivanov");
    assert!(snapshot.descriptions()[2].starts_with("#3 Carla Mendes (FINANCE, MANAGER)"));
}

#[test]
fn names_by_salary_desc_keep_roster_order_on_ties() {
    assert_eq!(
        sample().names_by_salary_desc(),
        vec![
            "Dmitri", "Carla", "Jonas", "Greta", "Ann", "Farid", "Kai", "Ann", "Hugo", "Bob",
            "Ines", "Eva"
        ]
    );
}

// ============================================================================
// Reduction
// ============================================================================

#[test]
fn salary_extremes() {
    let snapshot = sample();
    assert_eq!(snapshot.highest_paid().unwrap().id(), 5);
    assert_eq!(snapshot.lowest_paid().unwrap().id(), 6);
}

#[test]
fn salary_totals_agree() {
    let snapshot = sample();
    assert_eq!(snapshot.total_salary(), 62_600.0);
    assert_eq!(snapshot.combined_salary().unwrap(), 62_600.0);
    let avg = snapshot.average_salary().unwrap();
    assert!((avg - 62_600.0 / 12.0).abs() < 1e-9);
}

#[test]
fn paid_above_average() {
    assert_eq!(ids(&sample().paid_above_average()), vec![3, 5, 8, 11]);
}

#[test]
fn focus_department_salary() {
    assert_eq!(sample().focus_department_salary(), 15_600.0);
}

#[test]
fn tenure_queries() {
    let snapshot = sample();
    assert_eq!(snapshot.total_tenure_years(), 107);
    let veteran = snapshot.longest_serving().unwrap();
    assert_eq!(veteran.id(), 5);
    assert_eq!(veteran.tenure_years(snapshot.clock()), 21);
}

#[test]
fn empty_snapshot_reports_absence() {
    let empty = Snapshot::new(Vec::new(), clock()).unwrap();
    assert_eq!(empty.average_salary(), None);
    assert_eq!(empty.total_salary(), 0.0);
    assert!(empty.all_older_than());
    assert!(!empty.any_older_than());
    assert!(matches!(
        empty.highest_paid(),
        Err(StaffError::EmptyInput { operation: "highest_paid" })
    ));
    assert!(empty.lowest_paid().is_err());
    assert!(empty.longest_serving().is_err());
    assert!(matches!(
        empty.combined_salary(),
        Err(StaffError::EmptyInput { operation: "combined_salary" })
    ));
    assert!(empty.paid_above_average().is_empty());
    assert!(empty.headcount_by_department().is_empty());
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn grouped_by_department() {
    let snapshot = sample();
    let groups = snapshot.by_department();
    assert_eq!(groups.len(), 6);
    assert_eq!(ids(&groups[&Department::It]), vec![1, 2, 11]);
    assert_eq!(ids(&groups[&Department::Hr]), vec![4, 10]);
}

#[test]
fn headcounts() {
    let snapshot = sample();
    let by_department = snapshot.headcount_by_department();
    assert_eq!(by_department[&Department::It], 3);
    assert_eq!(by_department[&Department::Operations], 1);
    assert_eq!(by_department.values().sum::<usize>(), snapshot.len());

    let by_position = snapshot.headcount_by_position();
    assert_eq!(by_position[&Position::Intern], 1);
    assert_eq!(by_position[&Position::Lead], 2);
    assert_eq!(by_position.values().sum::<usize>(), snapshot.len());
}

#[test]
fn average_age_by_department() {
    let averages = sample().average_age_by_department();
    assert_eq!(averages[&Department::It], 38.0);
    assert_eq!(averages[&Department::Hr], 30.0);
    assert_eq!(averages[&Department::Marketing], 33.5);
    assert_eq!(averages[&Department::Operations], 52.0);
}

#[test]
fn salary_by_department() {
    let totals = sample().salary_by_department();
    assert_eq!(totals[&Department::It], 15_600.0);
    assert_eq!(totals[&Department::Finance], 14_400.0);
    assert_eq!(totals[&Department::Sales], 9_100.0);
    assert_eq!(totals.values().sum::<f64>(), 62_600.0);
}

#[test]
fn employer_partition() {
    let snapshot = sample();
    let split = snapshot.employer_partition();
    assert_eq!(ids(&split.matched), vec![3, 5, 11, 12]);
    assert_eq!(split.unmatched.len(), 8);
    assert_eq!(split.len(), snapshot.len());
}

#[test]
fn oldest_by_department() {
    let snapshot = sample();
    let oldest = snapshot.oldest_by_department();
    let winners: Vec<(Department, u32)> = oldest.iter().map(|(d, e)| (*d, e.id())).collect();
    assert_eq!(
        winners,
        vec![
            (Department::It, 11),
            (Department::Hr, 4),
            (Department::Finance, 8),
            (Department::Marketing, 12),
            (Department::Sales, 7),
            (Department::Operations, 5),
        ]
    );
}

#[test]
fn salary_by_name_last_wins() {
    let snapshot = sample();
    let pay = snapshot.salary_by_name();
    assert_eq!(pay.len(), 11);
    assert_eq!(pay["Ann"], 4_100.0);
    assert_eq!(pay["Dmitri"], 9_100.0);
}

#[test]
fn index_by_id() {
    let snapshot = sample();
    let index = snapshot.index_by_id();
    assert_eq!(index.len(), 12);
    assert_eq!(index[&7].full_name(), "Farid Haddad");
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn raised_salaries_leave_snapshot_untouched() {
    let snapshot = sample();
    let raised = snapshot.raised_salaries();
    assert_eq!(raised.len(), snapshot.len());
    for (before, after) in snapshot.employees().iter().zip(&raised) {
        assert_eq!(before.id(), after.id());
        assert!((after.salary() - before.salary() * 1.1).abs() < 1e-9);
    }
    assert_eq!(snapshot.total_salary(), 62_600.0);
}

#[test]
fn raise_factor_follows_config() {
    let snapshot = sample().with_config(CatalogueConfig::default().with_raise_factor(2.0));
    let raised = snapshot.raised_salaries();
    assert_eq!(raised[0].salary(), 10_400.0);
}

// ============================================================================
// Run by name
// ============================================================================

#[test]
fn run_by_name_matches_direct_calls() {
    let snapshot = sample();
    let output = snapshot.run("highest-paid".parse().unwrap()).unwrap();
    assert_eq!(output.value["id"], json!(5));

    let output = snapshot.run(QueryName::SalaryByName).unwrap();
    assert_eq!(output.value["Ann"], json!(4100.0));

    let output = snapshot.run(QueryName::BySurname).unwrap();
    assert_eq!(output.value["asc"][0]["surname"], json!("Berg"));
    assert_eq!(output.value["desc"][0]["surname"], json!("Zielinska"));
}

#[test]
fn custom_roster_snapshot() {
    let c = clock();
    let staff = vec![
        EmployeeDraft::new(1, "Ann", "Lee")
            .with_age(30)
            .with_salary(100.0)
            .validate(&c)
            .unwrap(),
        EmployeeDraft::new(2, "Ann", "Ray")
            .with_age(35)
            .with_salary(200.0)
            .validate(&c)
            .unwrap(),
    ];
    let snapshot = Snapshot::new(staff, c).unwrap();
    assert_eq!(snapshot.salary_by_name()["Ann"], 200.0);
    assert_eq!(snapshot.unique_names(), vec!["Ann"]);
}
