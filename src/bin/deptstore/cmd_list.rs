use anyhow::Result;
use log::warn;

use deptstore::{DepartmentManager, FileStore, SortKey};

use super::util::print_departments;

pub fn exec_list(mgr: &DepartmentManager<FileStore>, json: bool) -> Result<()> {
    print_departments(mgr.departments(), json)
}

pub fn exec_search(mgr: &DepartmentManager<FileStore>, term: String, json: bool) -> Result<()> {
    let found = mgr.search(&term);
    print_departments(&found, json)
}

pub fn exec_sort(
    mgr: &DepartmentManager<FileStore>,
    by: String,
    desc: bool,
    json: bool,
) -> Result<()> {
    if let Err(e) = by.parse::<SortKey>() {
        warn!("{}; listing in stored order", e);
    }
    let sorted = mgr.sort_by(&by, !desc);
    print_departments(&sorted, json)
}
