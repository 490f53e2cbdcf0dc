use clap::{Parser, Subcommand};
use outpass_app::{auth::password::hash_password, database};
use rand::{Rng, distributions::Alphanumeric};
use sqlx::PgPool;

mod admin;
mod db;
mod guard;
mod student;

const GENERATED_PASSWORD_LEN: usize = 20;

#[derive(Debug, Parser)]
#[command(name = "outpass-app", about = "Out-pass operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Student(student::StudentCommand),
    Admin(admin::AdminCommand),
    Guard(guard::GuardCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Student(command) => student::run(command).await,
            Commands::Admin(command) => admin::run(command).await,
            Commands::Guard(command) => guard::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

pub(crate) async fn connect(database_url: &str) -> Result<PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}

/// A login password and its hash.
pub(crate) struct Password {
    pub hash: String,

    /// Set when the password was generated and must be shown to the operator.
    pub generated: Option<String>,
}

pub(crate) fn password(supplied: Option<String>) -> Result<Password, String> {
    let (plain, generated) = match supplied {
        Some(plain) if plain.trim().is_empty() => return Err("password cannot be empty".to_string()),
        Some(plain) => (plain, false),
        None => {
            let plain: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(GENERATED_PASSWORD_LEN)
                .map(char::from)
                .collect();

            (plain, true)
        }
    };

    let hash = hash_password(&plain).map_err(|error| format!("failed to hash password: {error}"))?;

    Ok(Password {
        hash,
        generated: generated.then_some(plain),
    })
}

pub(crate) fn print_generated_password(password: &Password) {
    if let Some(plain) = &password.generated {
        println!("password: {plain}");
        println!("store this password now; it is only shown once");
    }
}
