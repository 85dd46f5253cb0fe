use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, EngineError};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "finance_admin")]
#[command(about = "Admin utilities for the finance tracker (bootstrap users, repair budgets)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./finance.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Budgets(Budgets),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    /// Display name shown in reports.
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
}

#[derive(Args, Debug)]
struct Budgets {
    #[command(subcommand)]
    command: BudgetsCommand,
}

#[derive(Subcommand, Debug)]
enum BudgetsCommand {
    /// Rebuild `spent` of every budget of a user from the stored expenses.
    Recompute(RecomputeArgs),
}

#[derive(Args, Debug)]
struct RecomputeArgs {
    #[arg(long)]
    username: String,
}

const PASSWORD_ATTEMPTS: usize = 3;

/// Keeps the terminal in raw mode while alive.
struct RawMode;

impl RawMode {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Replace the current terminal line with `text`.
fn rewrite_line(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(text)
    )?;
    out.flush()
}

/// Read a line without echoing it, printing `*` per character.
fn read_secret(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawMode::enter()?;
    let mut out = std::io::stderr();
    rewrite_line(&mut out, prompt)?;

    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                break;
            }
            KeyCode::Char('c') if ctrl => {
                execute!(out, Print("\r\n"))?;
                return Err("interrupted".into());
            }
            KeyCode::Backspace if secret.pop().is_some() => {
                execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
            }
            KeyCode::Char(ch) if !ctrl => {
                secret.push(ch);
                execute!(out, Print("*"))?;
            }
            _ => continue,
        }
        out.flush()?;
    }

    out.flush()?;
    Ok(secret)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..PASSWORD_ATTEMPTS {
        let password = read_secret("Password: ")?;
        if password.is_empty() {
            rewrite_line(&mut out, "Password must not be empty.\r\n")?;
            continue;
        }
        if read_secret("Confirm password: ")? == password {
            return Ok(password);
        }
        rewrite_line(&mut out, "Passwords do not match. Try again.\r\n")?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_password_twice()?;

            match engine
                .create_user(&args.username, &password, &args.name, &args.email)
                .await
            {
                Ok(user) => println!("created user: {} <{}>", user.username, user.email),
                Err(EngineError::ExistingKey(username)) => {
                    eprintln!("user already exists: {username}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Budgets(Budgets {
            command: BudgetsCommand::Recompute(args),
        }) => {
            if let Err(EngineError::KeyNotFound(_)) = engine.user(&args.username).await {
                eprintln!("user not found: {}", args.username);
                std::process::exit(1);
            }

            let budgets = engine.recompute_budget_spent(&args.username).await?;
            for budget in &budgets {
                println!(
                    "{:<20} {:>12} / {:<12} {:.1}%",
                    budget.category,
                    budget.spent,
                    budget.limit,
                    budget.usage()
                );
            }
            println!("recomputed {} budget(s)", budgets.len());
        }
    }

    Ok(())
}
