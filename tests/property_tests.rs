/// Property tests for the query engine.
///
/// Rosters are generated with a small pool of first names so that name
/// collisions, salary ties and shared surnames are common.
use chrono::{Duration, NaiveDate, NaiveDateTime};
use koru_staff::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn base_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn clock() -> QueryClock {
    QueryClock::at(base_date() + Duration::days(9000))
}

fn arb_department() -> impl Strategy<Value = Department> {
    prop::sample::select(Department::ALL.to_vec())
}

fn arb_position() -> impl Strategy<Value = Position> {
    prop::sample::select(Position::ALL.to_vec())
}

type Row = (&'static str, &'static str, i64, f64, Department, Position, bool, i64);

fn arb_row(surnames: Vec<&'static str>) -> impl Strategy<Value = Row> {
    (
        prop::sample::select(vec!["Ann", "Bob", "Cid", "Dee", "Eve"]),
        prop::sample::select(surnames),
        18_i64..70,
        // Whole hundreds so ties are frequent.
        (0_u32..100).prop_map(|h| f64::from(h) * 100.0),
        arb_department(),
        arb_position(),
        any::<bool>(),
        0_i64..9000,
    )
}

fn build(rows: Vec<Row>) -> Vec<Employee> {
    let clock = clock();
    rows.into_iter()
        .enumerate()
        .map(
            |(i, (name, surname, age, salary, department, position, employer, days))| {
                EmployeeDraft::new(i as u32 + 1, name, surname)
                    .with_age(age)
                    .with_salary(salary)
                    .with_department(department)
                    .with_position(position)
                    .employer(employer)
                    .with_start_date(base_date() + Duration::days(days))
                    .validate(&clock)
                    .unwrap()
            },
        )
        .collect()
}

fn arb_roster(max_len: usize) -> impl Strategy<Value = Vec<Employee>> {
    let surnames = vec!["Berg", "Costa", "Lind", "Nowak", "Zielinska"];
    prop::collection::vec(arb_row(surnames), 0..max_len).prop_map(build)
}

const DISTINCT_SURNAMES: [&str; 12] = [
    "Berg", "Costa", "Haddad", "Ivanov", "Kowalski", "Lind", "Martin", "Mendes", "Novak",
    "Nowak", "Wright", "Zielinska",
];

/// Rosters in which no two employees share a surname, in shuffled order.
fn arb_roster_distinct_surnames() -> impl Strategy<Value = Vec<Employee>> {
    let pool = DISTINCT_SURNAMES.to_vec();
    (
        Just(pool).prop_shuffle(),
        prop::collection::vec(arb_row(vec!["placeholder"]), 0..=DISTINCT_SURNAMES.len()),
    )
        .prop_map(|(surnames, rows)| {
            let rows = rows
                .into_iter()
                .zip(surnames)
                .map(|(row, surname)| (row.0, surname, row.2, row.3, row.4, row.5, row.6, row.7))
                .collect();
            build(rows)
        })
}

fn ids(records: &[&Employee]) -> Vec<u32> {
    records.iter().map(|e| e.id()).collect()
}

proptest! {
    #[test]
    fn average_lies_between_min_and_max(staff in arb_roster(40)) {
        prop_assume!(!staff.is_empty());
        let by_salary = Comparator::comparing(Employee::salary);
        let min = reduce::extreme_by(&staff, &by_salary, Extreme::Min).unwrap().salary();
        let max = reduce::extreme_by(&staff, &by_salary, Extreme::Max).unwrap().salary();
        let avg = reduce::average(&staff, Employee::salary).unwrap();
        let eps = 1e-9 * max.max(1.0);
        prop_assert!(min - eps <= avg && avg <= max + eps);
    }

    #[test]
    fn average_is_absent_only_when_empty(staff in arb_roster(10)) {
        prop_assert_eq!(reduce::average(&staff, Employee::salary).is_none(), staff.is_empty());
    }

    #[test]
    fn group_counts_add_up(staff in arb_roster(40)) {
        let counts = group::group_by_with(&staff, Employee::department, &Count);
        prop_assert_eq!(counts.values().sum::<usize>(), staff.len());
        let groups = group::group_by(&staff, Employee::department);
        for (department, members) in &groups {
            prop_assert_eq!(members.len(), counts[department]);
            prop_assert!(members.iter().all(|e| e.department() == *department));
            // Members keep input order.
            prop_assert!(ids(members).windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn partition_is_exact(staff in arb_roster(40), threshold in 0.0_f64..10_000.0) {
        let split = group::partition_by(&staff, |e| e.salary() > threshold);
        prop_assert_eq!(split.matched.len() + split.unmatched.len(), staff.len());
        let mut seen: Vec<u32> = ids(&split.matched);
        seen.extend(ids(&split.unmatched));
        seen.sort_unstable();
        let all: Vec<u32> = staff.iter().map(Employee::id).collect();
        prop_assert_eq!(seen, all);
        prop_assert!(split.matched.iter().all(|e| e.salary() > threshold));
        prop_assert!(split.unmatched.iter().all(|e| e.salary() <= threshold));
    }

    #[test]
    fn surname_sorts_are_stable(staff in arb_roster(30)) {
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let cmp = Comparator::from_fn(move |a: &Employee, b: &Employee| {
                order.apply(a.surname().cmp(b.surname()))
            });
            let sorted = select::sort_by(&staff, &cmp);
            prop_assert_eq!(sorted.len(), staff.len());
            for pair in sorted.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                match order {
                    SortOrder::Asc => prop_assert!(a.surname() <= b.surname()),
                    SortOrder::Desc => prop_assert!(a.surname() >= b.surname()),
                }
                if a.surname() == b.surname() {
                    prop_assert!(a.id() < b.id());
                }
            }
        }
    }

    #[test]
    fn descending_is_reversed_ascending_without_ties(staff in arb_roster_distinct_surnames()) {
        let surnames: HashSet<&str> = staff.iter().map(Employee::surname).collect();
        prop_assert_eq!(surnames.len(), staff.len());
        let by = |order: SortOrder| {
            Comparator::from_fn(move |a: &Employee, b: &Employee| {
                order.apply(a.surname().cmp(b.surname()))
            })
        };
        let mut asc = select::sort_by(&staff, &by(SortOrder::Asc));
        asc.reverse();
        let desc = select::sort_by(&staff, &by(SortOrder::Desc));
        prop_assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn with_salary_keeps_identity(staff in arb_roster(20), salary in 0.0_f64..1e7) {
        for e in &staff {
            let raised = e.with_salary(e.salary() * 1.1);
            prop_assert_eq!(raised.id(), e.id());
            let replaced = e.with_salary(salary);
            prop_assert_eq!(replaced.salary(), salary);
            prop_assert_eq!(replaced.full_name(), e.full_name());
            prop_assert_eq!(replaced.start_date(), e.start_date());
        }
    }

    #[test]
    fn distinct_names_bounded_by_count(staff in arb_roster(30)) {
        let distinct = select::distinct_by(&staff, Employee::name);
        prop_assert!(distinct.len() <= staff.len());
        let unique: HashSet<&str> = staff.iter().map(Employee::name).collect();
        prop_assert_eq!(distinct.len() == staff.len(), unique.len() == staff.len());
    }

    #[test]
    fn extreme_is_first_on_tie(staff in arb_roster(40)) {
        let by_salary = Comparator::comparing(Employee::salary);
        for kind in [Extreme::Min, Extreme::Max] {
            let Some(winner) = reduce::extreme_by(&staff, &by_salary, kind) else {
                prop_assert!(staff.is_empty());
                continue;
            };
            for e in &staff {
                match kind {
                    Extreme::Min => prop_assert!(winner.salary() <= e.salary()),
                    Extreme::Max => prop_assert!(winner.salary() >= e.salary()),
                }
                if e.id() < winner.id() {
                    prop_assert!(e.salary() != winner.salary());
                }
            }
        }
    }

    #[test]
    fn group_extreme_matches_per_group_extreme(staff in arb_roster(40)) {
        let by_age = Comparator::comparing(Employee::age);
        let oldest = group::group_extreme_by(&staff, Employee::department, &by_age, Extreme::Max);
        let groups = group::group_by(&staff, Employee::department);
        prop_assert_eq!(oldest.len(), groups.len());
        for (department, members) in &groups {
            let expected = reduce::extreme_by(members.iter().copied(), &by_age, Extreme::Max).unwrap();
            prop_assert_eq!(oldest[department].id(), expected.id());
        }
    }

    #[test]
    fn to_map_last_wins(staff in arb_roster(40)) {
        let pay = group::to_map_by(&staff, Employee::name, Employee::salary, keep_last);
        for (name, salary) in &pay {
            let last = staff.iter().rev().find(|e| e.name() == *name).unwrap();
            prop_assert_eq!(*salary, last.salary());
        }
        prop_assert_eq!(pay.len(), select::distinct_by(&staff, Employee::name).len());
    }

    #[test]
    fn fold_and_sum_agree(staff in arb_roster(40)) {
        // Whole-hundred salaries sum exactly, so order cannot matter here.
        let folded = reduce::fold(&staff, 0.0, |acc, e| acc + e.salary());
        prop_assert_eq!(folded, reduce::sum(&staff, Employee::salary));
        prop_assert_eq!(folded, reduce::summarize(&staff, Employee::salary).sum);
    }
}
