//! `cook-reminder` command-line entry point.
//!
//! # Responsibility
//! - Load config, start logging, open the database and dispatch one command.

mod args;
mod commands;
mod config;

use std::error::Error;
use std::fs;
use std::io;

use chrono::Local;
use clap::Parser;
use reminder_core::db::open_db;
use reminder_core::{init_logging, EpochMillis};

use crate::args::CliArgs;
use crate::commands::RunContext;

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    let loaded = config::load_or_create(args.config.as_deref())?;
    if loaded.created {
        eprintln!("Created config at {}", loaded.file.display());
    }
    let mut config = loaded.config;
    if let Some(db_path) = args.db {
        config.db_path = db_path;
    }

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir.to_str().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "log_dir must be valid UTF-8")
        })?;
        init_logging(&config.log_level, log_dir).map_err(io::Error::other)?;
    }

    if let Some(parent) = config.db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let conn = open_db(&config.db_path)?;

    let ctx = RunContext {
        conn: &conn,
        default_order: config.default_order,
        now: EpochMillis::now(),
        tz: &Local,
    };
    match commands::run(&ctx, args.command) {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(err) => {
            log::error!("event=cli_command module=cli status=error error={err}");
            Err(err)
        }
    }
}
