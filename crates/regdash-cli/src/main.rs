//! CLI entry point - argument parsing and command dispatch.
//!
//! Composition happens in `bootstrap`; handlers receive the composed
//! context and never touch infrastructure directly.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use regdash_cli::{Cli, CliConfig, Commands, RoleCommand, UserCommand, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::resolve(cli.data_dir.clone(), cli.api_url.clone())?;
    let ctx = bootstrap(config).await?;

    match cli.command {
        Commands::Role { command } => match command.unwrap_or(RoleCommand::Show {
            toggle_minimize: false,
        }) {
            RoleCommand::Show { toggle_minimize } => {
                handlers::role::show(&ctx, toggle_minimize).await
            }
            RoleCommand::Switch { name } => handlers::role::switch(&ctx, &name).await,
            RoleCommand::List => handlers::role::list(&ctx).await,
        },
        Commands::User { command } => match command.unwrap_or(UserCommand::Whoami) {
            UserCommand::Whoami => handlers::user::whoami(&ctx).await,
            UserCommand::List => handlers::user::list(&ctx).await,
            UserCommand::Switch { username } => handlers::user::switch(&ctx, &username).await,
            UserCommand::Logout => handlers::user::logout(&ctx).await,
        },
        Commands::Chat => handlers::chat::execute(&ctx).await,
        Commands::Titles => handlers::titles::execute(&ctx).await,
        Commands::Analytics => handlers::analytics::execute(&ctx).await,
        Commands::Generate { titles } => handlers::generate::execute(&ctx, titles).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "regdash_cli=debug,regdash_core=debug,regdash_api=debug,regdash_store=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
