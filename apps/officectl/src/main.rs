use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process;
use tracing_subscriber::EnvFilter;

use office_lib::util::connect_with_retry;
use office_lib::MIGRATOR;

const DATABASE_URL: &str = "DATABASE_URL";
const DATABASE_CONNECT_RETRIES: &str = "DATABASE_CONNECT_RETRIES";

fn cli() -> Command {
    Command::new("officectl")
        .about("Office directory operator CLI")
        .arg(
            Arg::new("migrations")
                .long("migrations")
                .action(ArgAction::SetTrue)
                .help("Apply the office-lib database migrations"),
        )
        .arg(
            Arg::new("list-migrations")
                .long("list-migrations")
                .action(ArgAction::SetTrue)
                .conflicts_with("migrations")
                .help("List the embedded migrations without connecting"),
        )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut command = cli();
    let matches = command.get_matches_mut();

    if let Err(e) = dispatch(&matches, &mut command).await {
        tracing::error!(error = %e, "officectl failed");
        process::exit(1);
    }
}

async fn dispatch(matches: &ArgMatches, command: &mut Command) -> Result<(), Box<dyn std::error::Error>> {
    if matches.get_flag("list-migrations") {
        list_migrations();
        Ok(())
    } else if matches.get_flag("migrations") {
        run_migrations().await
    } else {
        command.print_help()?;
        Ok(())
    }
}

fn list_migrations() {
    for migration in MIGRATOR.iter() {
        println!("{}\t{}", migration.version, migration.description);
    }
}

async fn run_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let db_url = std::env::var(DATABASE_URL)
        .map_err(|_| format!("{} must be set", DATABASE_URL))?;
    let retries = std::env::var(DATABASE_CONNECT_RETRIES)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let pool = connect_with_retry(&db_url, retries).await?;

    tracing::info!(migrations = MIGRATOR.iter().count(), "running office-lib migrations");
    MIGRATOR.run(&pool).await?;
    tracing::info!("migrations applied successfully");

    pool.close().await;
    Ok(())
}
