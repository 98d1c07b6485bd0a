//! Command execution context

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::cli::args::Cli;
use crate::model::Config;

/// Common context for a conversion run
pub struct Context {
    pub config: Config,
    pub out_root: PathBuf,
    pub cwd: PathBuf,
    pub report_file: Option<PathBuf>,
    pub dry_run: bool,
    pub quiet: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = crate::config::load_config(cli.config.as_deref())
            .context("failed to load configuration")?;

        if cli.no_color || !config.ui.color {
            colored::control::set_override(false);
        }

        let out_root = cli
            .outdir
            .clone()
            .unwrap_or_else(|| config.output.dir.clone());
        let cwd = std::env::current_dir().context("failed to read current directory")?;

        Ok(Self {
            config,
            out_root,
            cwd,
            report_file: cli.report.clone(),
            dry_run: cli.dry_run,
            quiet: cli.quiet,
        })
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Print an error message
    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }
}
