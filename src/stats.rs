//! Aggregate employee statistics over the live collection.

use serde::Serialize;
use std::fmt;

use crate::model::Department;

/// Id and name of a department attaining an extreme value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holder {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub departments: usize,
    pub total_employees: i64,
    pub average_employees: f64,
    pub max_employees: i32,
    pub min_employees: i32,
    /// Departments with `max_employees`, in collection order.
    pub largest: Vec<Holder>,
    /// Departments with `min_employees`, in collection order.
    pub smallest: Vec<Holder>,
}

impl Statistics {
    /// None for an empty collection ("no data").
    pub fn compute(departments: &[Department]) -> Option<Self> {
        let max = departments.iter().map(|d| d.employee_count).max()?;
        let min = departments.iter().map(|d| d.employee_count).min()?;
        let total: i64 = departments.iter().map(|d| d.employee_count as i64).sum();

        let holders = |target: i32| {
            departments
                .iter()
                .filter(|d| d.employee_count == target)
                .map(|d| Holder {
                    id: d.id,
                    name: d.name.clone(),
                })
                .collect::<Vec<_>>()
        };

        Some(Self {
            departments: departments.len(),
            total_employees: total,
            average_employees: total as f64 / departments.len() as f64,
            max_employees: max,
            min_employees: min,
            largest: holders(max),
            smallest: holders(min),
        })
    }

    /// Mean rounded to one decimal place, as displayed.
    pub fn average_rounded(&self) -> f64 {
        (self.average_employees * 10.0).round() / 10.0
    }
}

fn names(holders: &[Holder]) -> String {
    holders
        .iter()
        .map(|h| h.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Departments: {}", self.departments)?;
        writeln!(f, "Total employees: {}", self.total_employees)?;
        writeln!(f, "Average employees: {:.1}", self.average_rounded())?;
        writeln!(f, "Max employees: {} ({})", self.max_employees, names(&self.largest))?;
        write!(f, "Min employees: {} ({})", self.min_employees, names(&self.smallest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(id: u32, name: &str, n: i32) -> Department {
        Department::new(id, name, "", n)
    }

    #[test]
    fn empty_is_none() {
        assert!(Statistics::compute(&[]).is_none());
    }

    #[test]
    fn aggregates_and_holders() {
        let v = vec![dept(1, "A", 10), dept(2, "B", 2), dept(3, "C", 10)];
        let s = Statistics::compute(&v).unwrap();
        assert_eq!(s.departments, 3);
        assert_eq!(s.total_employees, 22);
        assert_eq!(s.average_rounded(), 7.3);
        assert_eq!(s.max_employees, 10);
        assert_eq!(s.min_employees, 2);
        assert_eq!(s.largest.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(s.smallest, vec![Holder { id: 2, name: "B".into() }]);

        let text = s.to_string();
        assert!(text.contains("Average employees: 7.3"));
        assert!(text.contains("Max employees: 10 (A, C)"));
    }
}
