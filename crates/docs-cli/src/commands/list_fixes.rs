//! List-fixes command implementation

use docs_core::FixRegistry;
use serde::Serialize;

use crate::error::Result;
use crate::render;

#[derive(Debug, Serialize)]
struct FixInfo {
    name: &'static str,
    description: &'static str,
    in_all: bool,
}

/// Run the list-fixes command
pub fn run_list_fixes(json: bool) -> Result<i32> {
    let registry = FixRegistry::with_builtins();
    if json {
        let catalog: Vec<FixInfo> = registry
            .iter()
            .map(|fix| FixInfo {
                name: fix.name(),
                description: fix.description(),
                in_all: fix.included_in_all(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        println!("{}", render::fix_catalog(&registry));
    }
    Ok(0)
}
