use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod util;
mod cmd_list;
mod cmd_show;
mod cmd_add;
mod cmd_update;
mod cmd_delete;
mod cmd_stats;
mod cmd_backup;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    let mut mgr = util::open_manager(cli.path);

    match cli.cmd {
        cli::Cmd::List { json } =>
            cmd_list::exec_list(&mgr, json),

        cli::Cmd::Show { id, json } =>
            cmd_show::exec(&mgr, id, json),

        cli::Cmd::Add { name, description, employees } =>
            cmd_add::exec(&mut mgr, name, description, employees),

        cli::Cmd::Update { id, name, description, employees } =>
            cmd_update::exec(&mut mgr, id, name, description, employees),

        cli::Cmd::Delete { id } =>
            cmd_delete::exec(&mut mgr, id),

        cli::Cmd::Search { term, json } =>
            cmd_list::exec_search(&mgr, term, json),

        cli::Cmd::Sort { by, desc, json } =>
            cmd_list::exec_sort(&mgr, by, desc, json),

        cli::Cmd::Stats { json } =>
            cmd_stats::exec(&mgr, json),

        cli::Cmd::Backup =>
            cmd_backup::exec(&mgr),
    }
}
