use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::client::{ClientError, Task, TodoClient};
use crate::session::{Session, SessionFile};

#[derive(Parser, Debug)]
#[command(name = "todo", about = "Manage your tasks from the terminal")]
pub struct Cli {
    /// Base URL of the task server
    #[arg(long, env = "TODO_SERVER", default_value = "http://localhost:8080")]
    pub server: String,

    /// Where the login session is kept between invocations
    #[arg(long, env = "TODO_SESSION_FILE", default_value = ".todo-session.json")]
    pub session_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Whoami,
    /// List every task
    List,
    /// Create a task
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Show a single task
    Show { id: i64 },
    /// Change the title and/or completion of a task
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Mark a task as completed
    Done { id: i64 },
    /// Mark a task as not completed
    Undo { id: i64 },
    /// Delete a task
    Remove { id: i64 },
}

/// Formats a task as a single line, e.g. `[x] 4  Buy milk`.
pub fn render_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("[{}] {}  {}", mark, task.id, task.title)
}

fn require_session(sessions: &SessionFile) -> anyhow::Result<Session> {
    Ok(sessions.load()?.ok_or(ClientError::NotLoggedIn)?)
}

fn authorized(client: &TodoClient, sessions: &SessionFile) -> anyhow::Result<TodoClient> {
    let session = require_session(sessions)?;
    Ok(client.clone().with_token(session.token))
}

/// Executes one command, writing user-facing output to `out`.
pub async fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let sessions = SessionFile::new(cli.session_file);
    let client = TodoClient::new(cli.server);

    match cli.command {
        Commands::Login { email, password } => {
            let response = client.login(&email, &password).await?;
            sessions.save(&Session {
                token: response.token,
                user: response.user.clone(),
            })?;
            writeln!(
                out,
                "Logged in as {} <{}>",
                response.user.name, response.user.email
            )?;
        }
        Commands::Logout => {
            sessions.clear()?;
            writeln!(out, "Logged out")?;
        }
        Commands::Whoami => {
            let session = require_session(&sessions)?;
            writeln!(out, "{} <{}>", session.user.name, session.user.email)?;
        }
        Commands::List => {
            let tasks = authorized(&client, &sessions)?.list_tasks().await?;
            if tasks.is_empty() {
                writeln!(out, "No tasks yet.")?;
            }
            for task in &tasks {
                writeln!(out, "{}", render_task(task))?;
            }
        }
        Commands::Add { title } => {
            let task = authorized(&client, &sessions)?
                .create_task(&title.join(" "))
                .await?;
            writeln!(out, "{}", render_task(&task))?;
        }
        Commands::Show { id } => {
            let task = authorized(&client, &sessions)?.get_task(id).await?;
            writeln!(out, "{}", render_task(&task))?;
            writeln!(out, "    created {}", task.created_at.to_rfc3339())?;
            writeln!(out, "    updated {}", task.updated_at.to_rfc3339())?;
        }
        Commands::Edit {
            id,
            title,
            completed,
        } => {
            if title.is_none() && completed.is_none() {
                anyhow::bail!("Nothing to change. Pass --title and/or --completed.");
            }
            let task = authorized(&client, &sessions)?
                .update_task(id, title.as_deref(), completed)
                .await?;
            writeln!(out, "{}", render_task(&task))?;
        }
        Commands::Done { id } => {
            let task = authorized(&client, &sessions)?
                .update_task(id, None, Some(true))
                .await?;
            writeln!(out, "{}", render_task(&task))?;
        }
        Commands::Undo { id } => {
            let task = authorized(&client, &sessions)?
                .update_task(id, None, Some(false))
                .await?;
            writeln!(out, "{}", render_task(&task))?;
        }
        Commands::Remove { id } => {
            let message = authorized(&client, &sessions)?.delete_task(id).await?;
            writeln!(out, "{}", message)?;
        }
    }
    Ok(())
}
