//! Validate command implementation

use colored::Colorize;
use docs_core::fixes::ALL;
use docs_core::{FixOptions, FixRegistry, Scanner, Validator};
use docs_schema::DocType;

use crate::cli::GlobalArgs;
use crate::context::run_config;
use crate::error::Result;
use crate::render;

/// Run the validate command
pub fn run_validate(
    global: &GlobalArgs,
    skip_build: bool,
    fix: bool,
    json: bool,
    doc_type: Option<&str>,
) -> Result<i32> {
    let filter = doc_type.map(str::parse::<DocType>).transpose()?;
    let config = run_config(global)?.with_skip_build(skip_build);

    if fix {
        let files = Scanner::new(&config).discover();
        let summary = FixRegistry::with_builtins().run(ALL, &files, &config, &FixOptions::default())?;
        if !json {
            println!("{}", "Applying fixes".bold());
            println!("{}", render::fix_summary(&summary, config.verbose()));
            println!();
        }
    }

    let report = Validator::new(&config).only(filter).run();
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", render::validation_report(&report, config.verbose()));
    }
    Ok(report.exit_code())
}
