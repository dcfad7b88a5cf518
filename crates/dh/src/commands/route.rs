//! `dh route` command implementation.

use clap::Args;
use dh_render::Subsystem;
use serde_json::json;

use super::{GlobalArgs, print_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the route command.
#[derive(Args)]
pub(crate) struct RouteArgs {
    /// Locale code (e.g. "en").
    locale: String,

    /// Route name (e.g. "admin_users_index").
    route: String,

    /// Subsystem to look in: admin or app (default: from the route prefix).
    #[arg(short, long)]
    subsystem: Option<Subsystem>,
}

impl RouteArgs {
    /// Execute the route command.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let service = global.service()?;

        let subsystem = self.resolve_subsystem();
        let lookup = service.help_for_route(&self.locale, &self.route, subsystem)?;

        output.extraction_errors(&lookup.errors);
        if lookup.content.is_empty() {
            output.info(&format!(
                "No help content for {} ({}, {subsystem})",
                self.route, self.locale
            ));
        }
        print_json(&json!({
            "errors": lookup.errors,
            "records": lookup.content,
        }))
    }

    fn resolve_subsystem(&self) -> Subsystem {
        self.subsystem.unwrap_or_else(|| {
            Subsystem::ALL
                .into_iter()
                .find(|s| s.owns_route(&self.route))
                .unwrap_or(Subsystem::Admin)
        })
    }
}
