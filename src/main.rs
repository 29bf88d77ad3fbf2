use anyhow::Result;
use clap::Parser;

use inline_link::cli::CliArgs;

fn main() -> Result<()> {
    inline_link::tracing::init();

    let plan = CliArgs::parse().into_plan()?;
    let config = plan.load_config()?;
    let output = plan.run(config)?;
    println!("{}", output);

    Ok(())
}
