use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI для менеджера подразделений (один вызов — одна операция)
#[derive(Parser, Debug)]
#[command(
    name = "deptstore",
    version,
    about = "Department records with write-through JSON storage",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Store file (default: $DEPTSTORE_PATH or ./departments.json)
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// List all departments in stored order
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show one department
    Show {
        #[arg(long)]
        id: u32,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Add a department
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        employees: i32,
    },
    /// Update a department. Omitted fields keep their current value.
    Update {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        employees: Option<i32>,
    },
    /// Delete a department
    Delete {
        #[arg(long)]
        id: u32,
    },
    /// Case-insensitive search in names and descriptions (empty term lists all)
    Search {
        #[arg(long, default_value = "")]
        term: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Sorted listing: name | employees | created | modified
    ///
    /// Пример:
    ///   deptstore sort --by employees --desc
    Sort {
        #[arg(long, default_value = "name")]
        by: String,
        #[arg(long, default_value_t = false)]
        desc: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Employee statistics
    Stats {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Copy the store file to <path>.backup_yyyyMMdd_HHmmss
    Backup,
}
