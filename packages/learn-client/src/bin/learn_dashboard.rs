//! Command-line front end for the learn dashboard API.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use learn_client::{
    ClientConfig, ClientError, DashboardService, FileSessionStore, HttpClient, Session,
    SessionStore, SessionUser,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "learn-dashboard")]
#[command(about = "Manage enrollments and your account on the learn platform")]
#[command(version)]
struct Cli {
    /// Session file (defaults to LEARN_SESSION_FILE or .learn-session.json)
    #[arg(long, global = true)]
    session_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a token and user id obtained from the login page
    Login {
        #[arg(long)]
        token: String,

        #[arg(long)]
        user_id: i64,
    },

    /// Forget the stored session
    Logout,

    /// List your enrollments
    Courses,

    /// Enroll in a course
    Enroll { course_id: i64 },

    /// Change your password
    ChangePassword {
        current_password: String,
        new_password: String,
    },

    /// Permanently delete your account
    DeleteAccount,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,learn_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            if let Some(nav) = e
                .downcast_ref::<ClientError>()
                .and_then(ClientError::navigation)
            {
                eprintln!("redirect: {}", nav.path());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load .env once; the session path and client config both read from it
    let _ = dotenvy::dotenv();

    let session_path = cli
        .session_file
        .or_else(|| std::env::var("LEARN_SESSION_FILE").ok())
        .unwrap_or_else(|| ".learn-session.json".to_string());
    let store = Arc::new(FileSessionStore::new(session_path));

    // Session bookkeeping works without a reachable or valid API config
    match &cli.command {
        Commands::Login { token, user_id } => {
            store.save(&Session::new(token.clone(), SessionUser::new(*user_id)))?;
            println!("Session stored in {}", store.path().display());
            return Ok(());
        }
        Commands::Logout => {
            store.clear()?;
            println!("Logged out");
            return Ok(());
        }
        _ => {}
    }

    let config = ClientConfig::from_lookup(|key| std::env::var(key).ok())
        .context("Failed to load configuration")?;
    let http = HttpClient::new(config, store.clone()).context("Failed to create HTTP client")?;
    let dashboard = DashboardService::new(http);

    match cli.command {
        // handled above
        Commands::Login { .. } | Commands::Logout => {}
        Commands::Courses => {
            let courses = dashboard.my_courses().await?;
            if courses.is_empty() {
                println!("No enrollments");
            }
            for course in courses {
                println!(
                    "#{:<6} course {:<6} {:<40} {}",
                    course.enrollment_id,
                    course.course_id,
                    course.course_name.as_deref().unwrap_or("(untitled)"),
                    course.status
                );
            }
        }
        Commands::Enroll { course_id } => {
            let message = dashboard.enroll(course_id).await?;
            println!("{}", message);
        }
        Commands::ChangePassword {
            current_password,
            new_password,
        } => {
            let user_id = logged_in_user(store.as_ref())?;
            dashboard
                .change_password(user_id, &current_password, &new_password)
                .await?;
            println!("Password changed");
        }
        Commands::DeleteAccount => {
            let user_id = logged_in_user(store.as_ref())?;
            let resp = dashboard.delete_account(user_id).await?;
            println!("Account deleted ({})", resp.status);
            dashboard.logout()?;
        }
    }

    Ok(())
}

fn logged_in_user(store: &dyn SessionStore) -> Result<i64> {
    let user_id = store
        .user()?
        .map(|user| user.user_id)
        .filter(|id| *id > 0)
        .ok_or_else(ClientError::not_logged_in)?;
    Ok(user_id)
}
