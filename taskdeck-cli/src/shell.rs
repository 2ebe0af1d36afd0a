//! The interactive shell.
//!
//! Presents the login/register menu and, once a user is authenticated, the
//! task menu. Collects raw strings, loops on invalid input until the
//! validators are satisfied, calls into the core operations, and renders
//! results. All reading and writing goes through generic `BufRead`/`Write`
//! handles so every loop here can be driven by string buffers in tests.
//!
//! Passwords are read from the same input handle as everything else; they
//! are handed straight to the core and never logged.

use std::io::{self, BufRead, Write};

use sqlx::SqlitePool;
use taskdeck_core::auth::accounts::{self, AuthError, RegisterError};
use taskdeck_core::auth::password::validate_password_policy;
use taskdeck_core::models::task::Task;
use taskdeck_core::models::user::User;
use taskdeck_core::tasks::{self, TaskError};
use taskdeck_core::validate::{
    parse_due_date, validate_description, validate_title, ValidationError, DUE_DATE_FORMAT,
};

/// The authenticated user for the duration of one task-menu visit.
#[derive(Debug, Clone)]
struct Session {
    user_id: i64,
    username: String,
}

/// Runs the interactive shell until the user exits or input ends.
///
/// End-of-input anywhere is treated as a request to leave: inner flows
/// unwind back here and the main loop stops.
pub async fn run<R: BufRead, W: Write>(
    pool: &SqlitePool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    loop {
        writeln!(out)?;
        writeln!(out, "What would you like to do?")?;
        writeln!(out, "1. Login")?;
        writeln!(out, "2. Register")?;
        writeln!(out, "3. Exit")?;

        let Some(choice) = prompt(input, out, "Enter your choice (1-3): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                if let Some(session) = login(pool, input, out).await? {
                    task_menu(pool, &session, input, out).await?;
                }
            }
            "2" => register(pool, input, out).await?,
            "3" => {
                writeln!(out, "Exiting...")?;
                break;
            }
            _ => writeln!(
                out,
                "Invalid choice. Please enter a number between 1 and 3."
            )?,
        }
    }

    Ok(())
}

/// Login flow: one attempt, then back to the main menu.
async fn login<R: BufRead, W: Write>(
    pool: &SqlitePool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<Session>> {
    let Some(username) = prompt(input, out, "Enter your username: ")? else {
        return Ok(None);
    };
    let Some(password) = prompt(input, out, "Enter your password: ")? else {
        return Ok(None);
    };

    match accounts::authenticate(pool, &username, &password).await {
        Ok(user_id) => {
            writeln!(out, "Login successful!")?;
            Ok(Some(Session { user_id, username }))
        }
        Err(AuthError::UnknownUser) => {
            writeln!(out, "Invalid username.")?;
            Ok(None)
        }
        Err(AuthError::BadPassword) => {
            writeln!(out, "Invalid password.")?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Registration flow: loops on the password until the policy passes.
async fn register<R: BufRead, W: Write>(
    pool: &SqlitePool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(username) = prompt(input, out, "Enter a username: ")? else {
        return Ok(());
    };

    let password = loop {
        let Some(candidate) = prompt(input, out, "Enter a password: ")? else {
            return Ok(());
        };

        let violations = validate_password_policy(&candidate);
        if violations.is_empty() {
            break candidate;
        }

        writeln!(out, "Password rejected:")?;
        for violation in violations {
            writeln!(out, "  - {}", violation)?;
        }
    };

    match accounts::register(pool, &username, &password).await {
        Ok(_) => writeln!(out, "Registration successful! You can now login.")?,
        Err(RegisterError::UsernameTaken) => {
            writeln!(out, "Username already exists. Please choose another one.")?
        }
        Err(RegisterError::EmptyUsername) => writeln!(out, "Username cannot be empty.")?,
        Err(RegisterError::WeakPassword(_)) => {
            writeln!(out, "Password does not satisfy the policy.")?
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// The task menu, shown while a user is logged in.
async fn task_menu<R: BufRead, W: Write>(
    pool: &SqlitePool,
    session: &Session,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    loop {
        writeln!(out)?;
        writeln!(out, "Task menu ({}):", session.username)?;
        writeln!(out, "1. Add a task")?;
        writeln!(out, "2. List all tasks")?;
        writeln!(out, "3. View task details")?;
        writeln!(out, "4. Update a task")?;
        writeln!(out, "5. Delete a task")?;
        writeln!(out, "6. Mark a task complete")?;
        writeln!(out, "7. Logout")?;

        let Some(choice) = prompt(input, out, "Enter your choice (1-7): ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => add_task(pool, session, input, out).await?,
            "2" => list_tasks(pool, out).await?,
            "3" => view_task(pool, input, out).await?,
            "4" => update_task(pool, input, out).await?,
            "5" => delete_task(pool, input, out).await?,
            "6" => complete_task(pool, input, out).await?,
            "7" => return Ok(()),
            _ => writeln!(
                out,
                "Invalid choice. Please enter a number between 1 and 7."
            )?,
        }
    }
}

async fn add_task<R: BufRead, W: Write>(
    pool: &SqlitePool,
    session: &Session,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    let Some(title) = prompt_field(
        input,
        out,
        "Enter the title for the new task: ",
        validate_title,
    )?
    else {
        return Ok(());
    };

    let Some(description) = prompt_field(
        input,
        out,
        "Enter the description for the new task: ",
        validate_description,
    )?
    else {
        return Ok(());
    };

    let Some(due_date) = prompt_due_date(
        input,
        out,
        "Enter the due date for the task (YYYY-MM-DD HH:MM) or leave blank if none: ",
    )?
    else {
        return Ok(());
    };

    match tasks::add_task(pool, &title, &description, &due_date, Some(session.user_id)).await {
        Ok(_) => writeln!(out, "Task added successfully.")?,
        Err(e) => render_task_error(out, e)?,
    }

    Ok(())
}

async fn list_tasks<W: Write>(pool: &SqlitePool, out: &mut W) -> anyhow::Result<()> {
    let tasks = tasks::list_tasks(pool).await?;
    if tasks.is_empty() {
        writeln!(out, "No tasks found.")?;
        return Ok(());
    }

    writeln!(out, "All Tasks:")?;
    for task in &tasks {
        write_task_details(pool, out, task).await?;
    }

    Ok(())
}

async fn view_task<R: BufRead, W: Write>(
    pool: &SqlitePool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    if !write_task_summaries(pool, out).await? {
        return Ok(());
    }

    let Some(id) = prompt_task_id(input, out, "Enter the ID of the task you want to view: ")?
    else {
        return Ok(());
    };

    match tasks::get_task(pool, id).await {
        Ok(task) => write_task_details(pool, out, &task).await?,
        Err(e) => render_task_error(out, e)?,
    }

    Ok(())
}

async fn update_task<R: BufRead, W: Write>(
    pool: &SqlitePool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    if !write_task_summaries(pool, out).await? {
        return Ok(());
    }

    let Some(id) = prompt_task_id(input, out, "Enter the ID of the task you want to update: ")?
    else {
        return Ok(());
    };

    let Some(title) = prompt_field(
        input,
        out,
        "Enter the new title for the task: ",
        validate_title,
    )?
    else {
        return Ok(());
    };

    let Some(description) = prompt_field(
        input,
        out,
        "Enter the new description for the task: ",
        validate_description,
    )?
    else {
        return Ok(());
    };

    let Some(due_date) = prompt_due_date(
        input,
        out,
        "Enter the new due date for the task (YYYY-MM-DD HH:MM) or leave blank if unchanged: ",
    )?
    else {
        return Ok(());
    };

    match tasks::update_task(pool, id, &title, &description, &due_date).await {
        Ok(_) => writeln!(out, "Task updated successfully.")?,
        Err(e) => render_task_error(out, e)?,
    }

    Ok(())
}

async fn delete_task<R: BufRead, W: Write>(
    pool: &SqlitePool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    if !write_task_summaries(pool, out).await? {
        return Ok(());
    }

    let Some(id) = prompt_task_id(input, out, "Enter the ID of the task you want to delete: ")?
    else {
        return Ok(());
    };

    match tasks::delete_task(pool, id).await {
        Ok(()) => writeln!(out, "Task deleted successfully.")?,
        Err(e) => render_task_error(out, e)?,
    }

    Ok(())
}

async fn complete_task<R: BufRead, W: Write>(
    pool: &SqlitePool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    if !write_task_summaries(pool, out).await? {
        return Ok(());
    }

    let Some(id) = prompt_task_id(
        input,
        out,
        "Enter the ID of the task you want to mark complete: ",
    )?
    else {
        return Ok(());
    };

    match tasks::complete_task(pool, id).await {
        Ok(_) => writeln!(out, "Task marked as complete.")?,
        Err(e) => render_task_error(out, e)?,
    }

    Ok(())
}

/// Prints the summary list used by the id-prompting flows.
///
/// Returns false (after a message) when there is nothing to pick from.
async fn write_task_summaries<W: Write>(pool: &SqlitePool, out: &mut W) -> anyhow::Result<bool> {
    let tasks = tasks::list_tasks(pool).await?;
    if tasks.is_empty() {
        writeln!(out, "No tasks found.")?;
        return Ok(false);
    }

    writeln!(out, "Task List:")?;
    for task in &tasks {
        writeln!(out, "Task #{}: {}", task.id, task.title)?;
    }

    Ok(true)
}

async fn write_task_details<W: Write>(
    pool: &SqlitePool,
    out: &mut W,
    task: &Task,
) -> anyhow::Result<()> {
    // The owner reference is weak; the user may be gone.
    let assigned = match task.user_id {
        Some(user_id) => User::find_by_id(pool, user_id)
            .await?
            .map(|user| user.username),
        None => None,
    };

    writeln!(out, "Task #{}:", task.id)?;
    writeln!(out, "  Title: {}", task.title)?;
    writeln!(out, "  Description: {}", task.description)?;
    writeln!(
        out,
        "  Created At: {}",
        task.created_at.format(DUE_DATE_FORMAT)
    )?;
    match task.due_date {
        Some(due) => writeln!(out, "  Due Date: {}", due.format(DUE_DATE_FORMAT))?,
        None => writeln!(out, "  Due Date: None")?,
    }
    writeln!(
        out,
        "  Is Completed: {}",
        if task.is_completed { "Yes" } else { "No" }
    )?;
    match assigned {
        Some(username) => writeln!(out, "  Assigned to: {}", username)?,
        None => writeln!(out, "  Assigned to: None")?,
    }

    Ok(())
}

fn render_task_error<W: Write>(out: &mut W, err: TaskError) -> anyhow::Result<()> {
    match err {
        TaskError::NotFound(_) => writeln!(out, "Task not found.")?,
        TaskError::Validation(e) => writeln!(out, "{}", e)?,
        TaskError::Database(e) => return Err(e.into()),
    }
    Ok(())
}

/// Writes a prompt and reads one line, with the terminator stripped.
///
/// Only the trailing newline is removed; field values keep whatever
/// whitespace the user typed. Returns None at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }

    Ok(Some(line))
}

/// Prompts until the supplied validator accepts the input.
fn prompt_field<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
    validate: fn(&str) -> Result<&str, ValidationError>,
) -> io::Result<Option<String>> {
    loop {
        let Some(line) = prompt(input, out, message)? else {
            return Ok(None);
        };

        match validate(&line) {
            Ok(_) => return Ok(Some(line)),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

/// Prompts until the input is empty (no due date) or a well-formed date.
///
/// The accepted raw string is returned; the core re-parses it when building
/// the task. States: awaiting input, accepted empty, accepted timestamp;
/// rejection loops back to awaiting input.
fn prompt_due_date<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    loop {
        let Some(line) = prompt(input, out, message)? else {
            return Ok(None);
        };

        match parse_due_date(&line) {
            Ok(_) => return Ok(Some(line)),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

/// Prompts until the input parses as a numeric task ID.
///
/// The operation itself still re-checks existence; this loop only rejects
/// non-numeric input.
fn prompt_task_id<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<i64>> {
    loop {
        let Some(line) = prompt(input, out, message)? else {
            return Ok(None);
        };

        match line.parse::<i64>() {
            Ok(id) => return Ok(Some(id)),
            Err(_) => writeln!(out, "Invalid input. Please enter a numerical ID.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_strips_only_the_terminator() {
        let mut input = Cursor::new("  hello \r\n");
        let mut out = Vec::new();

        let line = prompt(&mut input, &mut out, "> ").expect("prompt should succeed");
        assert_eq!(line.as_deref(), Some("  hello "));
        assert_eq!(String::from_utf8(out).unwrap(), "> ");
    }

    #[test]
    fn test_prompt_returns_none_at_eof() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        let line = prompt(&mut input, &mut out, "> ").expect("prompt should succeed");
        assert!(line.is_none());
    }

    #[test]
    fn test_prompt_field_reprompts_until_valid() {
        let mut input = Cursor::new("\n\nBuy milk\n");
        let mut out = Vec::new();

        let line = prompt_field(&mut input, &mut out, "title: ", validate_title)
            .expect("prompt should succeed");
        assert_eq!(line.as_deref(), Some("Buy milk"));

        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("title: ").count(), 3);
        assert!(output.contains("title cannot be empty"));
    }

    #[test]
    fn test_prompt_due_date_accepts_blank_and_reprompts_on_garbage() {
        let mut input = Cursor::new("2024-1-5 9:30\n\n");
        let mut out = Vec::new();

        let line =
            prompt_due_date(&mut input, &mut out, "due: ").expect("prompt should succeed");
        assert_eq!(line.as_deref(), Some(""));

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("invalid date format"));
    }

    #[test]
    fn test_prompt_task_id_rejects_non_numeric() {
        let mut input = Cursor::new("abc\n1.5\n12\n");
        let mut out = Vec::new();

        let id = prompt_task_id(&mut input, &mut out, "id: ").expect("prompt should succeed");
        assert_eq!(id, Some(12));

        let output = String::from_utf8(out).unwrap();
        assert_eq!(
            output
                .matches("Invalid input. Please enter a numerical ID.")
                .count(),
            2
        );
    }
}
