//! # Interactive Menus
//!
//! Presentation only: prompt text, table rendering, and log tailing. Every
//! real decision is delegated to the subsystem APIs; nothing here writes a
//! store directly.

use std::io::{self, BufRead, Write};
use std::path::Path;

use ev_01_submission::{ErrorCategory, SubmissionApi};
use ev_02_accounts::{AccountApi, AuthError, LockState};
use shared_audit::format_timestamp;
use shared_types::Role;

use crate::container::ServiceContainer;

/// How many trailing entries the history views show.
const HISTORY_TAIL: usize = 20;

/// Run the top-level menu until the user exits or stdin closes.
pub fn run(container: &mut ServiceContainer) -> io::Result<()> {
    loop {
        println!();
        println!("  ============================================================");
        println!("         EXAMVAULT - SECURE EXAMINATION SUBMISSIONS");
        println!("  ============================================================");
        println!("  1. Submit examination file");
        println!("  2. View my submissions");
        println!("  3. View all submissions (admin)");
        println!("  4. Login & account management");
        println!("  5. Exit");
        println!("  ============================================================");

        let Some(choice) = prompt("  Enter your choice [1-5]: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => submit_file(container)?,
            "2" => view_own_submissions(container)?,
            "3" => view_all_submissions(container),
            "4" => account_menu(container)?,
            "5" => {
                println!("\n  Goodbye.");
                return Ok(());
            }
            _ => println!("\n  Invalid choice. Please select a number between 1 and 5."),
        }
    }
}

fn submit_file(container: &mut ServiceContainer) -> io::Result<()> {
    println!("\n  --- Submit Examination File ---");
    let Some(student) = prompt("  Student ID: ")? else {
        return Ok(());
    };
    let Some(path) = prompt("  Path to file: ")? else {
        return Ok(());
    };

    match container.submissions.submit(&student, Path::new(&path)) {
        Ok(record) => println!(
            "\n  Submission accepted: {} ({} bytes).",
            record.filename, record.size_bytes
        ),
        Err(e) => match e.category() {
            ErrorCategory::Validation => {
                println!("\n  Rejected: {}. Check the file and try again.", e)
            }
            ErrorCategory::Duplicate => println!("\n  Rejected: {}.", e),
            ErrorCategory::Storage => println!("\n  Submission failed: {}.", e),
            ErrorCategory::Corruption => {
                println!("\n  ERROR: {}. Contact an administrator.", e)
            }
        },
    }
    Ok(())
}

fn view_own_submissions(container: &ServiceContainer) -> io::Result<()> {
    println!("\n  --- My Submissions ---");
    let Some(student) = prompt("  Student ID: ")? else {
        return Ok(());
    };

    let records = container.submissions.submissions_for(&student);
    if records.is_empty() {
        println!("\n  No submissions recorded for {}.", student);
        return Ok(());
    }

    println!("\n  {:<30} {:>10}  ACCEPTED AT", "FILENAME", "SIZE");
    println!("  {}", "-".repeat(64));
    for record in records {
        println!(
            "  {:<30} {:>10}  {}",
            record.filename,
            record.size_bytes,
            format_timestamp(record.accepted_at)
        );
    }
    Ok(())
}

fn view_all_submissions(container: &ServiceContainer) {
    println!("\n  --- All Submissions ---");
    let records = container.submissions.all_submissions();
    if records.is_empty() {
        println!("  No submissions recorded yet.");
        return;
    }

    println!(
        "\n  {:<15} {:<30} {:>10}  ACCEPTED AT",
        "STUDENT", "FILENAME", "SIZE"
    );
    println!("  {}", "-".repeat(80));
    for record in records {
        println!(
            "  {:<15} {:<30} {:>10}  {}",
            record.student_id,
            record.filename,
            record.size_bytes,
            format_timestamp(record.accepted_at)
        );
    }
}

fn account_menu(container: &mut ServiceContainer) -> io::Result<()> {
    loop {
        println!();
        println!("  ============================================================");
        println!("         LOGIN MONITOR & ACCOUNT MANAGEMENT");
        println!("  ============================================================");
        println!("  1. Login");
        println!("  2. Create account");
        println!("  3. View login history");
        println!("  4. View all accounts");
        println!("  5. Unlock an account");
        println!("  6. View submission activity log");
        println!("  7. Back to main menu");
        println!("  ============================================================");

        let Some(choice) = prompt("  Enter your choice [1-7]: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => login(container)?,
            "2" => create_account(container)?,
            "3" => tail_log(&container.config.login_log(), "Login Attempt History"),
            "4" => view_all_accounts(container),
            "5" => unlock_account(container)?,
            "6" => tail_log(
                &container.config.submission_log(),
                "Submission Activity Log",
            ),
            "7" => return Ok(()),
            _ => println!("\n  Invalid choice. Please select a number between 1 and 7."),
        }
    }
}

fn login(container: &mut ServiceContainer) -> io::Result<()> {
    println!("\n  --- Login ---");
    let Some(account_id) = prompt("  Username: ")? else {
        return Ok(());
    };
    let Some(password) = prompt("  Password: ")? else {
        return Ok(());
    };

    match container.accounts.login(&account_id, &password) {
        Ok(outcome) => {
            println!(
                "\n  Login successful! Welcome, {} ({}).",
                outcome.account_id, outcome.role
            );
            match outcome.previous_login {
                Some(ts) => println!("  Last login: {}", format_timestamp(ts)),
                None => println!("  Last login: first login"),
            }
        }
        Err(AuthError::AccountLocked { retry_after_secs }) => {
            println!("\n  Account is LOCKED due to too many failed attempts.");
            println!(
                "  Try again in {} minute(s).",
                retry_after_secs.div_ceil(60)
            );
        }
        Err(e) => println!("\n  {}.", e),
    }
    Ok(())
}

fn create_account(container: &mut ServiceContainer) -> io::Result<()> {
    println!("\n  --- Create New Account ---");
    let Some(account_id) = prompt("  Enter username (Student ID or admin name): ")? else {
        return Ok(());
    };
    let Some(role_text) = prompt("  Role (student/admin) [default: student]: ")? else {
        return Ok(());
    };
    let role = role_text.parse::<Role>().unwrap_or(Role::Student);

    let Some(password) = prompt("  Set password: ")? else {
        return Ok(());
    };
    let Some(confirm) = prompt("  Confirm password: ")? else {
        return Ok(());
    };
    if password != confirm {
        println!("\n  Error: passwords do not match.");
        return Ok(());
    }

    match container.accounts.create_account(&account_id, role, &password) {
        Ok(()) => println!("\n  Account '{}' ({}) created successfully.", account_id, role),
        Err(e) => println!("\n  Error: {}.", e),
    }
    Ok(())
}

fn view_all_accounts(container: &ServiceContainer) {
    println!("\n  --- Registered Accounts ---");
    let statuses = match container.accounts.list_accounts() {
        Ok(statuses) => statuses,
        Err(e) => {
            println!("  Error reading accounts: {}.", e);
            return;
        }
    };
    if statuses.is_empty() {
        println!("  No accounts registered yet.");
        return;
    }

    println!(
        "\n  {:<20} {:<10} {:<12} {:<8} LAST LOGIN",
        "USERNAME", "ROLE", "STATUS", "FAILED"
    );
    println!("  {}", "-".repeat(75));
    for status in statuses {
        let state = match status.state {
            LockState::Active => "ACTIVE".to_string(),
            LockState::Locked { remaining_secs } => {
                format!("LOCKED {}m", remaining_secs.div_ceil(60))
            }
        };
        let last_login = status
            .last_login
            .map(format_timestamp)
            .unwrap_or_else(|| "never".to_string());
        println!(
            "  {:<20} {:<10} {:<12} {:<8} {}",
            status.account_id, status.role, state, status.failed_attempts, last_login
        );
    }
}

fn unlock_account(container: &mut ServiceContainer) -> io::Result<()> {
    println!("\n  --- Unlock Account ---");
    let Some(account_id) = prompt("  Enter username to unlock: ")? else {
        return Ok(());
    };

    match container.accounts.unlock(&account_id) {
        Ok(()) => println!("\n  Account '{}' has been unlocked.", account_id),
        Err(e) => println!("\n  Error: {}.", e),
    }
    Ok(())
}

/// Print the last entries of an audit stream.
fn tail_log(path: &Path, title: &str) {
    println!("\n  --- {} ---", title);
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            println!("  No activity recorded yet.");
            return;
        }
        Err(e) => {
            println!("  Error reading {}: {}.", path.display(), e);
            return;
        }
    };

    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        println!("  No activity recorded yet.");
        return;
    }

    let start = lines.len().saturating_sub(HISTORY_TAIL);
    println!("\n  Showing last {} entries from {}:", lines.len() - start, path.display());
    println!("  {}", "-".repeat(80));
    for line in &lines[start..] {
        println!("  {}", line);
    }
}

/// Print a prompt and read one trimmed line. `None` means stdin closed.
fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
