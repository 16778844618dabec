//! Shared handlers for CLI commands.

pub mod auth;
pub mod favorite;
pub mod rating;
pub mod recipe;

use anyhow::{bail, Result};
use badchef::{CancelHandle, Page, Route};

/// A cancel handle that fires on Ctrl-C.
pub fn cancel_on_ctrl_c() -> CancelHandle {
    let cancel = CancelHandle::new();
    let handle = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupted, cancelling fetch");
            handle.cancel();
        }
    });
    cancel
}

/// Unwrap a mounted page, turning redirects and failures into errors.
pub fn into_data<T>(page: Page<T>) -> Result<T> {
    match page.redirect() {
        Some(Route::Login) => {
            bail!("Not logged in or session expired. Run 'badchef auth login' first.")
        }
        Some(route) => bail!("Redirected to {}", route),
        None => {}
    }

    if let Some(error) = page.state.error {
        bail!(error);
    }

    // A discarded fetch leaves the page loading.
    if page.state.loading {
        bail!("Interrupted");
    }

    match page.state.data {
        Some(data) => Ok(data),
        None => bail!("{} was not loaded", page.route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badchef::{Decision, PageState};

    fn page(decision: Decision, state: PageState<u32>) -> Page<u32> {
        Page {
            route: Route::Recipes,
            decision,
            state,
        }
    }

    #[test]
    fn test_into_data() {
        let mut ok = PageState::new();
        ok.data = Some(7);
        ok.loading = false;
        assert_eq!(into_data(page(Decision::Render, ok)).unwrap(), 7);

        let err = into_data(page(Decision::Redirect(Route::Login), PageState::new())).unwrap_err();
        assert!(err.to_string().contains("auth login"));

        let err = into_data(page(Decision::Render, PageState::new())).unwrap_err();
        assert_eq!(err.to_string(), "Interrupted");

        let mut failed = PageState::new();
        failed.loading = false;
        failed.error = Some("Server unreachable. Please try again later.".into());
        let err = into_data(page(Decision::Render, failed)).unwrap_err();
        assert_eq!(err.to_string(), "Server unreachable. Please try again later.");
    }
}
