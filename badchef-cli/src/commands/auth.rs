//! Auth commands.

use anyhow::Result;
use clap::Subcommand;
use serde_json::json;

use crate::config::build_client;
use crate::handlers::{auth as handlers, cancel_on_ctrl_c};
use crate::output::{print_item, print_status, OutputFormat};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account and log in
    Signup {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long, env = "BADCHEF_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in with username and password
    Login {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long, env = "BADCHEF_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out
    Logout,

    /// Show current auth status
    Status,
}

pub async fn handle(action: AuthAction, backend: Option<&str>, format: OutputFormat) -> Result<()> {
    match action {
        AuthAction::Signup {
            username,
            email,
            password,
        } => signup(backend, &username, &email, &password, format).await,
        AuthAction::Login { username, password } => {
            login(backend, &username, &password, format).await
        }
        AuthAction::Logout => logout(backend, format),
        AuthAction::Status => status(backend, format).await,
    }
}

async fn signup(
    backend: Option<&str>,
    username: &str,
    email: &str,
    password: &str,
    format: OutputFormat,
) -> Result<()> {
    let client = build_client(backend)?;
    let user = handlers::signup(&client, username, email, password).await?;

    print_status(
        &format!("Signed up and logged in as {}", user.username),
        &user,
        format,
    );
    Ok(())
}

async fn login(backend: Option<&str>, username: &str, password: &str, format: OutputFormat) -> Result<()> {
    let client = build_client(backend)?;
    handlers::login(&client, username, password).await?;

    print_status(
        &format!("Logged in as {}", username),
        &json!({ "username": username, "authenticated": true }),
        format,
    );
    Ok(())
}

fn logout(backend: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = build_client(backend)?;
    handlers::logout(&client)?;

    print_status("Logged out", &json!({ "authenticated": false }), format);
    Ok(())
}

async fn status(backend: Option<&str>, format: OutputFormat) -> Result<()> {
    let client = build_client(backend)?;
    let status = handlers::status(&client, &cancel_on_ctrl_c()).await?;

    print_item(&status, format);
    Ok(())
}
