//! a2conv - AviUtl1 to AviUtl2 script converter

use anyhow::Result;
use clap::Parser;

use a2conv::cli::{run, Cli, Context};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let ctx = Context::from_cli(&cli)?;

    if let Err(err) = run::execute(&ctx, &cli.inputs) {
        ctx.print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
    Ok(())
}
