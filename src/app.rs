use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::logging;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        profile,
        json,
        verbose,
        command,
    } = cli;

    logging::init(verbose);
    let ctx = AppContext::bootstrap(profile, json, verbose)?;

    match command {
        Command::Health => commands::health::run(&ctx).await,
        Command::Status(args) => commands::status::run(&ctx, args).await,
        Command::Validate(args) => commands::validate::run(&ctx, args).await,
        Command::Generate(args) => commands::generate::run(&ctx, args).await,
        Command::Compose(args) => commands::compose::run(&ctx, args).await,
        Command::Config(args) => commands::config::run(&ctx, args.command),
    }
}
