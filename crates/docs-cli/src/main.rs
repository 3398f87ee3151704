//! docs CLI
//!
//! Validates and repairs the Markdown documents of a docs-cms tree.
//! Exit codes: 0 no errors, 1 validation errors or failed files,
//! 2 usage or internal errors.

mod cli;
mod commands;
mod context;
mod error;
mod logging;
mod render;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::BulkArgs;
use error::{Result, EXIT_USAGE};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let code = match execute_command(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            EXIT_USAGE
        }
    };
    std::process::exit(code);
}

fn execute_command(cli: Cli) -> Result<i32> {
    let global = &cli.global;
    match cli.command {
        Commands::Validate {
            skip_build,
            fix,
            json,
            doc_type,
        } => commands::run_validate(global, skip_build, fix, json, doc_type.as_deref()),
        Commands::Fix {
            name,
            dry_run,
            diff,
            files,
            json,
        } => commands::run_fix(global, &name, dry_run, diff, &files, json),
        Commands::ListFixes { json } => commands::run_list_fixes(json),
        Commands::BulkUpdate {
            field,
            value,
            operation,
            new_name,
            dry_run,
            files,
            json,
        } => commands::run_bulk_update(
            global,
            &BulkArgs {
                field,
                value,
                operation,
                new_name,
                dry_run,
                files,
                json,
            },
        ),
        Commands::Completions { shell } => Ok(commands::run_completions(shell)),
    }
}
