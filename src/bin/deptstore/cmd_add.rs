use anyhow::Result;

use deptstore::{DepartmentManager, FileStore};

pub fn exec(
    mgr: &mut DepartmentManager<FileStore>,
    name: String,
    description: Option<String>,
    employees: i32,
) -> Result<()> {
    let d = mgr.add(&name, description.as_deref(), employees)?;
    println!("ADDED #{} '{}' -> {}", d.id, d.name, mgr.storage().path().display());
    Ok(())
}
