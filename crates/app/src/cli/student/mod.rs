use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct StudentCommand {
    #[command(subcommand)]
    command: StudentSubcommand,
}

#[derive(Debug, Subcommand)]
enum StudentSubcommand {
    Create(create::CreateStudentArgs),
}

pub(crate) async fn run(command: StudentCommand) -> Result<(), String> {
    match command.command {
        StudentSubcommand::Create(args) => create::run(args).await,
    }
}
