use anyhow::Result;

use deptstore::{DepartmentManager, FileStore};

pub fn exec(mgr: &DepartmentManager<FileStore>) -> Result<()> {
    let p = mgr.backup()?;
    println!("BACKUP {}", p.display());
    Ok(())
}
