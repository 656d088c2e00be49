use std::env;
use std::path::PathBuf;

use anyhow::{Ok, Result};

use super::{CommandResult, CommandSummary};
use crate::cli::args::CheckCommand;
use crate::core::context::CheckContext;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let start_dir = match &cmd.common.path {
        Some(path) => path.clone(),
        None => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let ctx = CheckContext::new(&start_dir, cmd.common.stylesheet.as_deref(), cmd.common.verbose)?;
    if cmd.common.verbose {
        println!(
            "Checking {} files ({} paths skipped)",
            ctx.files.len(),
            ctx.skipped_count
        );
    }
    let outcome = ctx.check();

    Ok(CommandResult {
        summary: CommandSummary::Check,
        issues: outcome.issues,
        files_checked: outcome.files_checked,
    })
}
