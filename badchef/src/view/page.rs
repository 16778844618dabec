//! Per-page fetch state and the guarded mount flow.

use serde::Serialize;
use std::future::Future;

use crate::cancel::CancelHandle;
use crate::client::RecipeClient;
use crate::error::{ErrorKind, Result};
use crate::session::{Decision, GuardPolicy, Route, RouteGuard};

/// The `data` / `loading` / `error` triple every page keeps.
#[derive(Debug, Clone, Serialize)]
pub struct PageState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

/// How a load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Data arrived and was stored.
    Loaded,
    /// The fetch failed; `error` holds the message.
    Failed(ErrorKind),
    /// The server rejected the session. The caller should log out.
    SessionExpired,
    /// The view went away first; state was left untouched.
    Discarded,
}

impl<T> PageState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a fetch result into the page.
    pub fn apply(&mut self, result: Result<T>) -> LoadOutcome {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.loading = false;
                LoadOutcome::Loaded
            }
            Err(e) if e.kind() == ErrorKind::Cancelled => LoadOutcome::Discarded,
            Err(e) => {
                log::warn!("page fetch failed: {}", e);
                self.error = Some(e.user_message());
                self.loading = false;
                if e.is_auth_error() {
                    LoadOutcome::SessionExpired
                } else {
                    LoadOutcome::Failed(e.kind())
                }
            }
        }
    }

    /// Run one fetch under `cancel` and fold its result in.
    pub async fn load<F>(&mut self, cancel: &CancelHandle, fetch: F) -> LoadOutcome
    where
        F: Future<Output = Result<T>>,
    {
        self.loading = true;
        let result = cancel.run(fetch).await;
        self.apply(result)
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.data.is_some()
    }
}

/// A mounted page: the guard's verdict plus whatever was fetched.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub route: Route,
    pub decision: Decision,
    pub state: PageState<T>,
}

impl<T> Page<T> {
    /// Where to go instead of rendering, if anywhere.
    pub fn redirect(&self) -> Option<Route> {
        match self.decision {
            Decision::Redirect(route) => Some(route),
            Decision::Render | Decision::Loading => None,
        }
    }
}

/// Run a guard's check under `cancel`. `None` means the check was abandoned.
async fn check_guard(
    guard: &mut RouteGuard,
    client: &RecipeClient,
    cancel: &CancelHandle,
) -> Option<Decision> {
    let validator = client.validator();
    cancel
        .run(async { Ok(guard.check(client.store(), &validator).await) })
        .await
        .ok()
}

/// Mount a guarded data page.
///
/// The guard runs first. Only when it says render is `fetch` invoked, once.
/// A fetch that comes back with an expired session logs out and turns the
/// page into a redirect to login. Cancelling during either step leaves the
/// page loading with nothing fetched.
pub async fn open<T, F, Fut>(
    client: &RecipeClient,
    route: Route,
    cancel: &CancelHandle,
    fetch: F,
) -> Page<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut guard = RouteGuard::new(GuardPolicy::for_route(&route));
    let Some(decision) = check_guard(&mut guard, client, cancel).await else {
        log::debug!("{} abandoned during session check", route);
        return Page {
            route,
            decision: guard.decision(),
            state: PageState::new(),
        };
    };

    let mut page = Page {
        route,
        decision,
        state: PageState::new(),
    };

    if decision != Decision::Render {
        log::debug!("{} not rendered: {:?}", route, decision);
        page.state.loading = false;
        return page;
    }

    if page.state.load(cancel, fetch()).await == LoadOutcome::SessionExpired {
        if let Err(e) = client.logout() {
            log::warn!("logout after expired session failed: {}", e);
        }
        page.decision = Decision::Redirect(Route::Login);
    }

    page
}

/// Mount the login page. Returns a redirect when a valid session exists.
///
/// A cancelled check leaves the form showing.
pub async fn enter_login(client: &RecipeClient, cancel: &CancelHandle) -> Decision {
    let mut guard = RouteGuard::login_page();
    match check_guard(&mut guard, client, cancel).await {
        Some(decision) => decision,
        None => guard.decision(),
    }
}
