//! Category tree command.

use crate::cli::common::{format_binding, print_json, BindingOutput, CliError, CliResult, SessionArgs};
use crate::services::{SessionView, TreeRow};
use clap::Args;
use serde::Serialize;

/// Show the custom category tree with the bindings each category presents
#[derive(Debug, Clone, Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Collapse every category with this name (repeatable)
    #[arg(short, long, value_name = "NAME")]
    pub collapse: Vec<String>,

    /// Collapse every category, leaving only the roots listed
    #[arg(long, conflicts_with = "collapse")]
    pub collapse_all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TreeOutput {
    categories: Vec<CategoryOutput>,
    binding_count: usize,
    unmapped: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CategoryOutput {
    name: String,
    path: String,
    level: usize,
    collapsed: bool,
    warning: bool,
    bindings: Vec<BindingOutput>,
}

impl TreeArgs {
    /// Execute the tree command
    pub fn execute(&self) -> CliResult<()> {
        let mut loaded = self.session.load()?;

        if self.collapse_all {
            loaded.session.set_all_collapsed(true);
        }

        for name in &self.collapse {
            if loaded.session.collapse_by_name(name) == 0 {
                return Err(CliError::validation(format!("Category '{name}' not found")));
            }
        }

        let session = &loaded.session;
        let ui = &loaded.config.ui;
        let report = session.report();

        let SessionView::Tree(rows) = session.view() else {
            return Err(CliError::validation("Tree view is not available while a filter is active"));
        };

        let rows: Vec<TreeRow<'_>> = rows
            .into_iter()
            .map(|mut row| {
                if !ui.show_inactive {
                    row.bindings.retain(|b| b.active);
                }
                row
            })
            .filter(|row| {
                ui.show_empty
                    || row.category.has_children
                    || !session.bindings_for(row.category.id).is_empty()
            })
            .collect();

        if self.json {
            let output = TreeOutput {
                binding_count: rows.iter().map(|row| row.bindings.len()).sum(),
                categories: rows
                    .iter()
                    .map(|row| CategoryOutput {
                        name: row.category.name.clone(),
                        path: session.tree().display_path(row.category.id),
                        level: row.category.level,
                        collapsed: row.category.collapsed,
                        warning: row.category.warning,
                        bindings: row
                            .bindings
                            .iter()
                            .map(|b| BindingOutput::new(b, report))
                            .collect(),
                    })
                    .collect(),
                unmapped: report.unmapped.clone(),
            };
            return print_json(&output);
        }

        for row in &rows {
            let indent = "  ".repeat(row.category.level);
            let marker = match (row.category.has_children, row.category.collapsed) {
                (true, true) => "▸ ",
                (true, false) => "▾ ",
                _ => "  ",
            };
            let warning = if row.category.warning { " ⚠" } else { "" };
            println!("{indent}{marker}{}{warning}", row.category.name);
            for binding in &row.bindings {
                println!("{indent}      {}", format_binding(binding, report));
            }
        }

        if !report.unmapped.is_empty() {
            println!();
            println!("Unmapped categories: {}", report.unmapped.join(", "));
        }

        Ok(())
    }
}
