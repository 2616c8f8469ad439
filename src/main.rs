use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use aws_cost_calculator::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // The server configures tracing from its own config once loaded
    if !matches!(args.get_command(), cli::Commands::Start { .. }) {
        init_tracing("warn", false);
    }

    match args.get_command() {
        cli::Commands::Start { port } => {
            commands::start::execute(&args.config, port).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Prices { region } => {
            commands::prices::execute(&region)?;
        }
        cli::Commands::Version => {
            println!("AWS Cost Calculator v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
