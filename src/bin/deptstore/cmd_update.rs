use anyhow::Result;

use deptstore::{Department, DepartmentManager, DeptError, FileStore};

/// Fields given on the command line, merged over the current record.
/// A blank --name keeps the current name (names cannot be empty); an absent
/// --description keeps the current one, while an explicit "" clears it.
fn merge(
    current: Department,
    name: Option<String>,
    description: Option<String>,
    employees: Option<i32>,
) -> (String, String, i32) {
    let name = name
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(current.name);
    let description = description.unwrap_or(current.description);
    let employees = employees.unwrap_or(current.employee_count);
    (name, description, employees)
}

pub fn exec(
    mgr: &mut DepartmentManager<FileStore>,
    id: u32,
    name: Option<String>,
    description: Option<String>,
    employees: Option<i32>,
) -> Result<()> {
    let current = mgr.get(id).cloned().ok_or(DeptError::NotFound(id))?;
    let (name, description, employees) = merge(current, name, description, employees);

    let d = mgr.update(id, &name, Some(&description), employees)?;
    println!("UPDATED #{} '{}'", d.id, d.name);
    Ok(())
}
