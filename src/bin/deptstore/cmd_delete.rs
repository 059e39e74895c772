use anyhow::Result;

use deptstore::{DepartmentManager, FileStore};

pub fn exec(mgr: &mut DepartmentManager<FileStore>, id: u32) -> Result<()> {
    let d = mgr.delete(id)?;
    println!("DELETED #{} '{}'", d.id, d.name);
    Ok(())
}
