use anyhow::Result;
use std::path::PathBuf;

use deptstore::{Department, DepartmentManager, DepartmentRecord, FileStore, ManagerBuilder};

/// Env config, with --path taking precedence.
pub fn open_manager(path: Option<PathBuf>) -> DepartmentManager<FileStore> {
    let mut b = ManagerBuilder::new();
    if let Some(p) = path {
        b = b.path(p);
    }
    b.open()
}

pub fn print_department(d: &Department) {
    println!("#{} {}", d.id, d.name);
    println!("  description: {}", d.description);
    println!("  employees:   {}", d.employee_count);
    println!("  created:     {}", d.created_date.format(deptstore::TIMESTAMP_FORMAT));
    println!("  modified:    {}", d.last_modified_date.format(deptstore::TIMESTAMP_FORMAT));
}

pub fn print_departments(list: &[Department], json: bool) -> Result<()> {
    if json {
        let records: Vec<DepartmentRecord> = list.iter().map(DepartmentRecord::from).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if list.is_empty() {
        println!("no departments");
        return Ok(());
    }
    println!("{} department(s)", list.len());
    for d in list {
        print_department(d);
    }
    Ok(())
}
