//! Auth handlers.

use anyhow::{bail, Context, Result};
use badchef::{view, CancelHandle, Decision, RecipeClient, Route, User};
use colored::Colorize;
use serde::Serialize;

use crate::output::PlainPrint;

/// Session status as shown by `auth status`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    pub backend: String,
    pub authenticated: bool,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl PlainPrint for AuthStatus {
    fn plain_print(&self) {
        match &self.username {
            Some(name) if self.authenticated => {
                println!("Logged in as {}", name.green().bold());
                if let Some(email) = &self.email {
                    println!("   {}", email.dimmed());
                }
            }
            _ => println!("{}", "Not logged in".yellow()),
        }
        println!("   Backend: {}", self.backend.dimmed());
    }
}

/// Create an account and log straight into it.
pub async fn signup(
    client: &RecipeClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User> {
    client
        .users()
        .register(username, email, password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    client
        .users()
        .me()
        .await
        .context("Account created but the profile could not be loaded")
}

/// Exchange credentials for a session token.
pub async fn login(client: &RecipeClient, username: &str, password: &str) -> Result<()> {
    client
        .users()
        .login(username, password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    Ok(())
}

/// Drop the stored session.
pub fn logout(client: &RecipeClient) -> Result<()> {
    let next = client.logout().context("Failed to clear session")?;
    tracing::debug!("after logout: {}", next.path());
    Ok(())
}

/// Check the stored session against the server.
pub async fn status(client: &RecipeClient, cancel: &CancelHandle) -> Result<AuthStatus> {
    let mut status = AuthStatus {
        backend: client.base_url().to_string(),
        authenticated: false,
        username: None,
        email: None,
    };

    // The login-page guard clears a rejected token, same as the web flow.
    let decision = view::enter_login(client, cancel).await;
    if cancel.is_cancelled() {
        bail!("Interrupted");
    }
    if decision != Decision::Redirect(Route::Recipes) {
        return Ok(status);
    }

    let me = cancel.run(client.users().me()).await?;
    status.authenticated = true;
    status.username = Some(me.username);
    status.email = Some(me.email).filter(|e| !e.is_empty());
    Ok(status)
}
