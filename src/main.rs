// field-intake - offline survey collection for maternal health field work
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use field_intake_lib::db::FormSubmission;
use field_intake_lib::{Database, Exporter, IntakeError, Result, SessionStore};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Grab whatever the user typed
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "register" => handle_register(&args[2..]).await,
        "login" => handle_login(&args[2..]).await,
        "logout" => handle_logout().await,
        "submit" => handle_submit(&args[2..]).await,
        "records" => handle_records().await,
        "export" => handle_export().await,
        "status" => handle_status().await,
        "version" | "-v" | "--version" => {
            println!("field-intake v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

async fn handle_register(args: &[String]) -> Result<()> {
    let Some((email, password)) = credentials_from(args) else {
        eprintln!("Usage: field-intake register <email> <password>");
        return Ok(());
    };

    let db = get_database().await?;

    match db.register_account(email, password).await {
        Ok(_) => {
            // New accounts go straight into a live session
            let account = db.login(email, password).await?;
            session_store()?.save(&account.email)?;
            println!("✓ Registered and logged in as {}", account.email);
        }
        Err(e @ (IntakeError::Validation(_) | IntakeError::DuplicateAccount)) => {
            eprintln!("✗ Registration failed: {}", e.user_message());
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

async fn handle_login(args: &[String]) -> Result<()> {
    let Some((email, password)) = credentials_from(args) else {
        eprintln!("Usage: field-intake login <email> <password>");
        return Ok(());
    };

    let db = get_database().await?;

    match db.login(email, password).await {
        Ok(account) => {
            session_store()?.save(&account.email)?;
            println!("✓ Logged in as {}", account.email);
        }
        Err(e @ (IntakeError::Validation(_) | IntakeError::InvalidCredentials)) => {
            eprintln!("✗ Login failed: {}", e.user_message());
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

async fn handle_logout() -> Result<()> {
    // Drop the marker first so a half-finished logout still looks logged out
    session_store()?.clear()?;

    let db = get_database().await?;
    db.logout_all().await?;

    println!("✓ Logged out");
    Ok(())
}

async fn handle_submit(args: &[String]) -> Result<()> {
    if active_session()?.is_none() {
        return Ok(());
    }

    let Some(file) = args.first() else {
        eprintln!("Usage: field-intake submit <file.json>");
        return Ok(());
    };

    let contents = std::fs::read_to_string(file)?;
    let submission: FormSubmission = serde_json::from_str(&contents)?;

    let db = get_database().await?;

    match db.insert_record(submission).await {
        Ok(id) => println!("✓ Record #{} saved", id),
        Err(e) => eprintln!("✗ Submission failed: {}", e.user_message()),
    }

    Ok(())
}

async fn handle_records() -> Result<()> {
    if active_session()?.is_none() {
        return Ok(());
    }

    let db = get_database().await?;
    let records = db.fetch_all_records().await?;

    if records.is_empty() {
        println!("No records collected yet.");
    } else {
        println!("\nCollected records:");
        println!("{}", "=".repeat(60));
        for record in &records {
            println!(
                "{:4}. {} | {} | {}, {} (by {})",
                record.id,
                if record.collection_date.is_empty() {
                    "no date"
                } else {
                    record.collection_date.as_str()
                },
                if record.woman_name.is_empty() {
                    "unnamed"
                } else {
                    record.woman_name.as_str()
                },
                record.village,
                record.district,
                record.email
            );
        }
        println!("{}", "=".repeat(60));
        println!("{} record(s) total", records.len());
    }

    Ok(())
}

async fn handle_export() -> Result<()> {
    if active_session()?.is_none() {
        return Ok(());
    }

    // No share sheet on this platform; the snapshot path is the deliverable.
    let exporter = Exporter::new(database_path()?);

    match exporter.export_snapshot(None).await {
        Ok(outcome) => {
            println!("✓ Database exported to {}", outcome.path.display());
            if !outcome.shared {
                println!("  (no share surface on this platform, copy the file yourself)");
            }
        }
        Err(e @ IntakeError::DatabaseFileMissing(_)) => {
            eprintln!("✗ Export failed: {}", e.user_message());
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

async fn handle_status() -> Result<()> {
    let db = get_database().await?;
    let stats = db.stats().await?;
    let session = session_store()?.load()?;

    println!("\nfield-intake Status");
    println!("{}", "=".repeat(60));

    println!("\nSession:");
    match session {
        Some(email) => println!("  Logged in as {}", email),
        None => println!("  Not logged in"),
    }

    println!("\nDatabase ({}):", db.path().display());
    println!("  Accounts: {}", stats.total_accounts);
    println!("  Records:  {}", stats.total_records);

    println!("{}", "=".repeat(60));

    Ok(())
}

fn credentials_from(args: &[String]) -> Option<(&str, &str)> {
    match args {
        [email, password] => Some((email.as_str(), password.as_str())),
        _ => None,
    }
}

// Session marker gates the data-entry commands, same as the app only shows
// the form to a logged-in worker.
fn active_session() -> Result<Option<String>> {
    let session = session_store()?.load()?;
    if session.is_none() {
        eprintln!("Not logged in. Run: field-intake login <email> <password>");
    }
    Ok(session)
}

fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| IntakeError::Config("Could not determine home directory".to_string()))?;

    Ok(home.join(".field-intake"))
}

fn database_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("intake.db"))
}

async fn get_database() -> Result<Database> {
    Database::new(database_path()?).await
}

fn session_store() -> Result<SessionStore> {
    Ok(SessionStore::new(app_dir()?))
}

fn print_usage() {
    println!(
        r#"field-intake v{} - Offline obstetric survey collection

USAGE:
    field-intake <COMMAND> [OPTIONS]

COMMANDS:
    register <email> <password>   Create a field worker account
    login <email> <password>      Log in and start a session
    logout                        End the session
    submit <file.json>            Store a completed survey form
    records                       List collected records
    export                        Snapshot the database for hand-off
    status                        Show session and database stats
    version                       Show version
    help                          Show this help

EXAMPLES:
    field-intake register collector@example.com s3cret
    field-intake submit visit-042.json
    field-intake records
    field-intake export

Records never leave the device until you run 'export'.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
