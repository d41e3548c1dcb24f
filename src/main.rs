use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gazette::app::AppContext;
use gazette::cli::{commands, Cli, Commands};
use gazette::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut ctx = AppContext::new(&config, cli.db)?;

    match cli.command {
        Commands::Headlines {
            country,
            category,
            source,
            range,
            page,
            page_size,
        } => {
            commands::headlines(
                &mut ctx,
                commands::HeadlinesArgs {
                    country,
                    category,
                    source,
                    range,
                    page,
                    page_size,
                },
            )
            .await?;
        }
        Commands::Search {
            query,
            sort_by,
            sources,
            range,
            page,
            page_size,
        } => {
            commands::search(
                &mut ctx,
                commands::SearchArgs {
                    query,
                    sort_by,
                    sources,
                    range,
                    page,
                    page_size,
                },
            )
            .await?;
        }
        Commands::Read { index } => {
            commands::read(&ctx, index)?;
        }
        Commands::Bookmarks { command } => {
            commands::bookmarks(&mut ctx, command)?;
        }
        Commands::Settings { command } => {
            commands::settings(&mut ctx, command)?;
        }
    }

    Ok(())
}
