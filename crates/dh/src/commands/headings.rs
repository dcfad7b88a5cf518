//! `dh headings` command implementation.

use clap::Args;
use serde_json::json;

use super::{GlobalArgs, print_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the headings command.
#[derive(Args)]
pub(crate) struct HeadingsArgs {
    /// Leave extraction errors out of the result.
    #[arg(long)]
    no_warnings: bool,
}

impl HeadingsArgs {
    /// Execute the headings command.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let service = global.service()?;

        let lookup = service.all_by_heading(!self.no_warnings)?;
        output.extraction_errors(&lookup.errors);

        print_json(&json!({
            "errors": lookup.errors,
            "headings": lookup.content,
        }))
    }
}
