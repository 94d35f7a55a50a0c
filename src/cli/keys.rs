//! Key vocabulary command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::MapType;
use clap::Args;
use serde::Serialize;

/// List known event types or resolve filter tokens to key codes
#[derive(Debug, Clone, Args)]
pub struct KeysArgs {
    /// Tokens to resolve (e.g. "a", "+", "arrow"). Lists the vocabulary when omitted.
    #[arg(value_name = "TOKEN")]
    pub tokens: Vec<String>,

    /// Only list event types whose code or name contains QUERY
    #[arg(long, value_name = "QUERY", conflicts_with = "tokens")]
    pub search: Option<String>,

    /// Only list event types of this device class
    #[arg(long, value_enum, value_name = "MAP_TYPE", conflicts_with = "tokens")]
    pub map_type: Option<MapType>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EventTypeOutput {
    code: String,
    name: String,
    map_type: String,
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    token: String,
    codes: Vec<String>,
}

impl KeysArgs {
    /// Execute the keys command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let db = config
            .event_types()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        if self.tokens.is_empty() {
            let candidates = match (self.map_type, self.search.as_deref()) {
                (Some(map_type), None) => db.by_map_type(map_type),
                (map_type, query) => db
                    .search(query.unwrap_or(""))
                    .into_iter()
                    .filter(|event_type| map_type.map_or(true, |t| event_type.map_type == t))
                    .collect(),
            };
            let listed: Vec<EventTypeOutput> = candidates
                .into_iter()
                .map(|event_type| EventTypeOutput {
                    code: event_type.code.clone(),
                    name: event_type.name.clone(),
                    map_type: event_type.map_type.display_name().to_string(),
                })
                .collect();

            if self.json {
                return print_json(&listed);
            }
            for event_type in &listed {
                println!("{:<20} {:<24} {}", event_type.code, event_type.name, event_type.map_type);
            }
            println!();
            println!("{} event type(s)", listed.len());
            return Ok(());
        }

        let resolved: Vec<ResolveOutput> = self
            .tokens
            .iter()
            .map(|token| ResolveOutput {
                token: token.clone(),
                codes: db.resolve_token(token).into_iter().collect(),
            })
            .collect();

        if self.json {
            print_json(&resolved)?;
        } else {
            for entry in &resolved {
                if entry.codes.is_empty() {
                    println!("{:<12} ✗ no matching key", entry.token);
                } else {
                    println!("{:<12} {}", entry.token, entry.codes.join(", "));
                }
            }
        }

        let unknown: Vec<&str> = resolved
            .iter()
            .filter(|entry| entry.codes.is_empty())
            .map(|entry| entry.token.as_str())
            .collect();
        if !unknown.is_empty() {
            return Err(CliError::validation(format!(
                "No key matches: {}",
                unknown.join(", ")
            )));
        }

        Ok(())
    }
}
