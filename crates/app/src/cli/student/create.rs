use clap::Args;
use outpass_app::{
    database::Db,
    domain::students::{
        PgStudentsService, StudentsService,
        data::NewStudent,
        records::StudentUuid,
    },
};
use uuid::Uuid;

use crate::cli::{connect, password, print_generated_password};

#[derive(Debug, Args)]
pub(crate) struct CreateStudentArgs {
    /// Roll number, used as the login identifier
    #[arg(long)]
    roll_number: String,

    /// Display name
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,

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

    /// Optional student UUID; generated when omitted
    #[arg(long)]
    student_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateStudentArgs) -> Result<(), String> {
    let password = password(args.password)?;
    let pool = connect(&args.database_url).await?;

    let student = PgStudentsService::new(Db::new(pool))
        .create_student(NewStudent {
            uuid: args
                .student_uuid
                .map_or_else(StudentUuid::new, StudentUuid::from_uuid),
            roll_number: args.roll_number,
            name: args.name,
            email: args.email,
            phone: args.phone,
            department: args.department,
            year: args.year,
            section: args.section,
            password_hash: password.hash.clone(),
        })
        .await
        .map_err(|error| format!("failed to create student: {error}"))?;

    println!("student_uuid: {}", student.uuid);
    println!("roll_number: {}", student.roll_number);
    println!(
        "scope: {} / {} / {}",
        student.department, student.year, student.section
    );
    print_generated_password(&password);

    Ok(())
}
