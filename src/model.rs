//! model — Department record and its external (JSON) form.
//!
//! Внешнее представление (одна запись):
//!   { "id": 1, "name": "Sales", "description": "", "employeeCount": 5,
//!     "createdDate": "2024-01-31 09:15:00", "lastModifiedDate": "2024-01-31 09:15:00" }
//!
//! Timestamps are wall-clock local time truncated to whole seconds, so a
//! record converted to its external form and back is equal field-by-field.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ParseError;

/// Canonical timestamp format of the external representation.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Short date format used by the human-readable `Display` form.
const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Current local time with sub-second precision dropped.
#[inline]
pub fn now_secs() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse `yyyy-MM-dd HH:mm:ss`. `field` names the source field for the error.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| ParseError::BadTimestamp {
        field,
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub employee_count: i32,
    pub created_date: NaiveDateTime,
    pub last_modified_date: NaiveDateTime,
}

impl Default for Department {
    fn default() -> Self {
        let now = now_secs();
        Self {
            id: 0,
            name: String::new(),
            description: String::new(),
            employee_count: 0,
            created_date: now,
            last_modified_date: now,
        }
    }
}

impl Department {
    /// New record with both timestamps stamped to "now".
    pub fn new<N, D>(id: u32, name: N, description: D, employee_count: i32) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        let now = now_secs();
        Self {
            id,
            name: name.into(),
            description: description.into(),
            employee_count,
            created_date: now,
            last_modified_date: now,
        }
    }

    /// Convert to the external representation.
    pub fn to_record(&self) -> DepartmentRecord {
        DepartmentRecord {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            employee_count: self.employee_count,
            created_date: format_timestamp(&self.created_date),
            last_modified_date: format_timestamp(&self.last_modified_date),
        }
    }
}

/// Identity key of a department. Deduplication and lookups compare by this
/// key only; `PartialEq` on `Department` stays structural.
#[inline]
pub fn department_key(d: &Department) -> u32 {
    d.id
}

/// Case-folded name used for uniqueness checks and name ordering.
#[inline]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Description: {}, Employees: {}, Created: {}, Modified: {}",
            self.id,
            self.name,
            self.description,
            self.employee_count,
            self.created_date.format(DISPLAY_DATE_FORMAT),
            self.last_modified_date.format(DISPLAY_DATE_FORMAT),
        )
    }
}

/// External (serialized) form of a department.
///
/// `id` and `employeeCount` are typed integers, so a non-numeric value never
/// reaches `to_department`: it fails while deserializing the document (a
/// `serde_json::Error`), which the store treats like any other parse failure.
/// `ParseError` therefore only covers the string timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub employee_count: i32,
    pub created_date: String,
    pub last_modified_date: String,
}

impl DepartmentRecord {
    pub fn to_department(&self) -> Result<Department, ParseError> {
        Ok(Department {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            employee_count: self.employee_count,
            created_date: parse_timestamp("createdDate", &self.created_date)?,
            last_modified_date: parse_timestamp("lastModifiedDate", &self.last_modified_date)?,
        })
    }
}

impl From<&Department> for DepartmentRecord {
    fn from(d: &Department) -> Self {
        d.to_record()
    }
}

impl TryFrom<DepartmentRecord> for Department {
    type Error = ParseError;

    fn try_from(r: DepartmentRecord) -> Result<Self, Self::Error> {
        r.to_department()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn new_stamps_both_timestamps_equal() {
        let d = Department::new(7, "Ops", "night shift", 3);
        assert_eq!(d.created_date, d.last_modified_date);
        assert_eq!(d.created_date.nanosecond(), 0);
    }

    #[test]
    fn record_uses_canonical_format_and_camel_case() {
        let mut d = Department::new(1, "Sales", "", 5);
        d.created_date = ts(9, 5, 1);
        d.last_modified_date = ts(10, 0, 59);

        let json = serde_json::to_value(d.to_record()).unwrap();
        assert_eq!(json["employeeCount"], 5);
        assert_eq!(json["createdDate"], "2024-03-07 09:05:01");
        assert_eq!(json["lastModifiedDate"], "2024-03-07 10:00:59");

        let back = d.to_record().to_department().unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn bad_timestamp_is_parse_error() {
        let mut r = Department::new(1, "Sales", "", 5).to_record();
        r.created_date = "07.03.2024 09:05".to_string();
        let err = r.to_department().unwrap_err();
        assert!(matches!(err, ParseError::BadTimestamp { field: "createdDate", .. }));
    }

    #[test]
    fn non_numeric_count_rejected_by_serde() {
        let raw = r#"{"id":1,"name":"A","description":"","employeeCount":"many",
                      "createdDate":"2024-03-07 09:05:01","lastModifiedDate":"2024-03-07 09:05:01"}"#;
        assert!(serde_json::from_str::<DepartmentRecord>(raw).is_err());

        let raw = r#"{"id":"one","name":"A","description":"","employeeCount":1,
                      "createdDate":"2024-03-07 09:05:01","lastModifiedDate":"2024-03-07 09:05:01"}"#;
        let err = serde_json::from_str::<DepartmentRecord>(raw).unwrap_err();
        assert!(err.is_data(), "{err}");
    }

    #[test]
    fn identity_key_ignores_other_fields() {
        let a = Department::new(4, "A", "", 1);
        let b = Department::new(4, "B", "x", 9);
        assert_eq!(department_key(&a), department_key(&b));
        assert_eq!(name_key("  EnGineering "), "engineering");
    }

    #[test]
    fn display_uses_short_dates() {
        let mut d = Department::new(2, "HR", "people", 4);
        d.created_date = ts(1, 2, 3);
        d.last_modified_date = ts(1, 2, 3);
        assert_eq!(
            d.to_string(),
            "ID: 2, Name: HR, Description: people, Employees: 4, Created: 07.03.2024, Modified: 07.03.2024"
        );
    }
}
