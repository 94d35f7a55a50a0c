//! Hotkey Editor - keyboard shortcut browser
//!
//! Presents host keymaps under a custom category hierarchy, with name and
//! key-combination filters.

use clap::{Parser, Subcommand};
use hotkey_editor::cli::{
    CliError, ConfigArgs, ExitCode, FilterArgs, KeysArgs, MapArgs, TreeArgs,
};
use hotkey_editor::constants::APP_BINARY_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hotkey Editor - browse and filter keyboard shortcuts by category
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the category tree with its bindings
    Tree(TreeArgs),
    /// Find bindings by name or key combination
    Filter(FilterArgs),
    /// Summarize the native-to-custom category mapping
    Map(MapArgs),
    /// List event types or resolve key tokens
    Keys(KeysArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> Result<(), CliError> {
        match self {
            Self::Tree(args) => args.execute(),
            Self::Filter(args) => args.execute(),
            Self::Map(args) => args.execute(),
            Self::Keys(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code().into());
    }

    std::process::exit(ExitCode::Success.into());
}
