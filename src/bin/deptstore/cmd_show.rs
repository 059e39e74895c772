use anyhow::Result;

use deptstore::{DepartmentManager, DepartmentRecord, DeptError, FileStore};

use super::util::print_department;

pub fn exec(mgr: &DepartmentManager<FileStore>, id: u32, json: bool) -> Result<()> {
    let d = mgr.get(id).ok_or(DeptError::NotFound(id))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&DepartmentRecord::from(d))?);
    } else {
        print_department(d);
    }
    Ok(())
}
