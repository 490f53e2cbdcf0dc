use clap::Args;
use outpass_app::{
    database::Db,
    domain::guards::{GuardsService, PgGuardsService, data::NewGuard, records::GuardUuid},
};

use crate::cli::{connect, password, print_generated_password};

#[derive(Debug, Args)]
pub(crate) struct CreateGuardArgs {
    /// Username, used as the login identifier
    #[arg(long)]
    username: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login password; generated when omitted
    #[arg(long)]
    password: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateGuardArgs) -> Result<(), String> {
    let password = password(args.password)?;
    let pool = connect(&args.database_url).await?;

    let guard = PgGuardsService::new(Db::new(pool))
        .create_guard(NewGuard {
            uuid: GuardUuid::new(),
            username: args.username,
            name: args.name,
            password_hash: password.hash.clone(),
        })
        .await
        .map_err(|error| format!("failed to create security guard: {error}"))?;

    println!("guard_uuid: {}", guard.uuid);
    println!("username: {}", guard.username);
    print_generated_password(&password);

    Ok(())
}
