use clap::Args;
use outpass_app::{
    database::Db,
    domain::admins::{AdminsService, PgAdminsService, data::NewAdmin, records::AdminUuid},
};
use uuid::Uuid;

use crate::cli::{connect, password, print_generated_password};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Email address, used as the login identifier
    #[arg(long)]
    email: String,

    /// Display name, stamped on decisions
    #[arg(long)]
    name: String,

    /// Department the admin decides for
    #[arg(long)]
    department: String,

    #[arg(long)]
    year: String,

    #[arg(long)]
    section: String,

    /// Login password; generated when omitted
    #[arg(long)]
    password: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let password = password(args.password)?;
    let pool = connect(&args.database_url).await?;

    let admin = PgAdminsService::new(Db::new(pool))
        .create_admin(NewAdmin {
            uuid: AdminUuid::new(),
            email: args.email,
            name: args.name,
            department: args.department,
            year: args.year,
            section: args.section,
            password_hash: password.hash.clone(),
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("email: {}", admin.email);

    if scope_is_incomplete([
        admin.department.as_str(),
        admin.year.as_str(),
        admin.section.as_str(),
    ]) {
        println!("warning: scope is incomplete; this admin will not see any out-passes");
    }

    print_generated_password(&password);

    Ok(())
}

fn scope_is_incomplete(parts: [&str; 3]) -> bool {
    parts.iter().any(|part| part.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_scope_is_not_flagged() {
        assert!(!scope_is_incomplete(["CSE", "3", "A"]));
    }

    #[test]
    fn empty_part_is_flagged() {
        assert!(scope_is_incomplete(["CSE", "", "A"]));
    }

    #[test]
    fn whitespace_part_is_flagged() {
        assert!(scope_is_incomplete(["CSE", "3", " "]));
    }
}
