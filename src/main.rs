use std::io;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use weekly_brief::app::AppContext;
use weekly_brief::cli::{commands, Cli, Commands, CurrentAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut out = io::stdout();

    match cli.command {
        Commands::Configure(args) => {
            let mut ctx = AppContext::for_configure(cli.settings)?;
            commands::configure(&mut ctx, args, &mut out)?;
        }
        Commands::Current { action } => {
            let ctx = AppContext::new(cli.settings)?;
            run_current(&ctx, action, &mut out).await?;
        }
    }

    Ok(())
}

async fn run_current(
    ctx: &AppContext,
    action: CurrentAction,
    out: &mut impl io::Write,
) -> weekly_brief::app::Result<()> {
    match action {
        CurrentAction::Show => commands::show_current(ctx, out).await,
        CurrentAction::Load => commands::load_current(ctx, out).await,
        CurrentAction::Send { prod } => commands::send(ctx, prod, out).await,
    }
}
