use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct GuardCommand {
    #[command(subcommand)]
    command: GuardSubcommand,
}

#[derive(Debug, Subcommand)]
enum GuardSubcommand {
    Create(create::CreateGuardArgs),
}

pub(crate) async fn run(command: GuardCommand) -> Result<(), String> {
    match command.command {
        GuardSubcommand::Create(args) => create::run(args).await,
    }
}
