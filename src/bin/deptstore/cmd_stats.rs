use anyhow::Result;

use deptstore::{DepartmentManager, FileStore};

pub fn exec(mgr: &DepartmentManager<FileStore>, json: bool) -> Result<()> {
    match (mgr.statistics(), json) {
        (Some(s), true) => println!("{}", serde_json::to_string_pretty(&s)?),
        (Some(s), false) => println!("{}", s),
        (None, true) => println!("null"),
        (None, false) => println!("no data"),
    }
    Ok(())
}
