//! Mapping summary command.

use crate::cli::common::{print_json, CliResult, SessionArgs};
use clap::Args;
use serde::Serialize;

/// Summarize how host keymaps map onto the custom categories
#[derive(Debug, Clone, Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct MapOutput {
    categories: usize,
    bindings: usize,
    entries: Vec<EntryOutput>,
    unmapped: Vec<String>,
    conflicts: Vec<u32>,
}

#[derive(Debug, Serialize)]
struct EntryOutput {
    category: String,
    bindings: usize,
    in_hierarchy: bool,
}

impl MapArgs {
    /// Execute the map command
    pub fn execute(&self) -> CliResult<()> {
        let loaded = self.session.load()?;
        let session = &loaded.session;
        let report = session.report();

        let entries: Vec<EntryOutput> = session
            .index()
            .map(|index| {
                index
                    .entries()
                    .iter()
                    .map(|entry| EntryOutput {
                        category: entry.category.clone(),
                        bindings: entry.bindings.len(),
                        in_hierarchy: session.tree().contains_name(&entry.category),
                    })
                    .collect()
            })
            .unwrap_or_default();

        if self.json {
            let output = MapOutput {
                categories: report.categories,
                bindings: report.bindings,
                entries,
                unmapped: report.unmapped.clone(),
                conflicts: report.conflicts.iter().map(|id| id.0).collect(),
            };
            return print_json(&output);
        }

        for entry in &entries {
            let flag = if entry.in_hierarchy { "" } else { "  (unmapped)" };
            println!("{:>5}  {}{flag}", entry.bindings, entry.category);
        }
        println!();
        println!(
            "{} categories, {} bindings, {} conflicting",
            report.categories,
            report.bindings,
            report.conflicts.len()
        );
        if !report.unmapped.is_empty() {
            println!("Unmapped categories: {}", report.unmapped.join(", "));
        }

        Ok(())
    }
}
