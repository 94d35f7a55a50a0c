//! Binding filter command.

use crate::cli::common::{format_binding, print_json, BindingOutput, CliResult, SessionArgs};
use crate::services::{Filter, FilterHit, FilterMode, SessionView};
use clap::Args;
use serde::Serialize;

/// Find bindings by operator name or by key combination
#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// How to interpret the filter text (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<FilterMode>,

    /// Filter text, e.g. "select" or "ctrl shift a"
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FilterOutput {
    mode: FilterMode,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    matches: Vec<HitOutput>,
}

#[derive(Debug, Serialize)]
struct HitOutput {
    category: String,
    #[serde(flatten)]
    binding: BindingOutput,
}

impl FilterArgs {
    /// Execute the filter command
    pub fn execute(&self) -> CliResult<()> {
        let mut loaded = self.session.load()?;
        let mode = self.mode.unwrap_or(loaded.config.filter.default_mode);
        loaded
            .session
            .set_filter(Filter::new(mode, self.text.join(" ")));

        let session = &loaded.session;
        let report = session.report();

        let (hits, failure) = match session.view() {
            SessionView::Filtered { hits, failure, .. } => (hits, failure),
            // Blank text after trimming shows everything
            SessionView::Tree(_) => (session.filtered_bindings(), None),
        };
        let hits: Vec<FilterHit<'_>> = hits
            .into_iter()
            .filter(|hit| loaded.config.ui.show_inactive || hit.binding.active)
            .collect();

        if self.json {
            let output = FilterOutput {
                mode,
                text: session.filter().text.clone(),
                error: failure.as_ref().map(ToString::to_string),
                matches: hits
                    .iter()
                    .map(|hit| HitOutput {
                        category: hit.category.to_string(),
                        binding: BindingOutput::new(hit.binding, report),
                    })
                    .collect(),
            };
            return print_json(&output);
        }

        if let Some(failure) = &failure {
            println!("No bindings match: {failure}");
            return Ok(());
        }
        if hits.is_empty() {
            println!("No bindings match");
            return Ok(());
        }

        let mut current: Option<&str> = None;
        for hit in &hits {
            if current != Some(hit.category) {
                println!("{}", hit.category);
                current = Some(hit.category);
            }
            println!("    {}", format_binding(hit.binding, report));
        }
        println!();
        println!("{} binding(s) match", hits.len());

        Ok(())
    }
}
