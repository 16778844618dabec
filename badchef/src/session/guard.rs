//! Route guards.
//!
//! One state machine serves both the login page and the protected pages;
//! only the [`GuardPolicy`] differs.
//!
//! ```text
//! Checking --(no token)----------------------> Unauthenticated
//! Checking --(token, Valid)------------------> Authenticated
//! Checking --(token, Invalid, clear token)---> Unauthenticated
//! ```

use super::route::Route;
use super::validator::{SessionValidator, SessionValidity, Validity};
use crate::error::Result;
use crate::store::TokenStore;

/// Where a guard is in its check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Checking,
    Authenticated,
    Unauthenticated,
}

/// What the page should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Show the wrapped page.
    Render,
    /// Show a placeholder.
    Loading,
    /// Navigate elsewhere.
    Redirect(Route),
}

/// Action per guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardPolicy {
    pub while_checking: Decision,
    pub on_valid: Decision,
    pub on_invalid: Decision,
}

impl GuardPolicy {
    /// Login page: visible until a valid session is found, then leave.
    pub const LOGIN_PAGE: GuardPolicy = GuardPolicy {
        while_checking: Decision::Render,
        on_valid: Decision::Redirect(Route::Recipes),
        on_invalid: Decision::Render,
    };

    /// Protected page: placeholder while checking, login when rejected.
    pub const PROTECTED: GuardPolicy = GuardPolicy {
        while_checking: Decision::Loading,
        on_valid: Decision::Render,
        on_invalid: Decision::Redirect(Route::Login),
    };

    /// Pick the guard a route needs.
    pub fn for_route(route: &Route) -> Self {
        if route.requires_auth() {
            Self::PROTECTED
        } else {
            Self::LOGIN_PAGE
        }
    }
}

/// A guard instance. Create one per mount.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    policy: GuardPolicy,
    state: GuardState,
    validity: SessionValidity,
}

impl RouteGuard {
    /// Create a guard with a custom policy.
    pub fn new(policy: GuardPolicy) -> Self {
        Self {
            policy,
            state: GuardState::Checking,
            validity: SessionValidity::Unknown,
        }
    }

    /// Guard for pages that need a valid session.
    pub fn protected() -> Self {
        Self::new(GuardPolicy::PROTECTED)
    }

    /// Guard for the login page.
    pub fn login_page() -> Self {
        Self::new(GuardPolicy::LOGIN_PAGE)
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn validity(&self) -> SessionValidity {
        self.validity
    }

    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    /// Decision for the current state.
    pub fn decision(&self) -> Decision {
        match self.state {
            GuardState::Checking => self.policy.while_checking,
            GuardState::Authenticated => self.policy.on_valid,
            GuardState::Unauthenticated => self.policy.on_invalid,
        }
    }

    /// Run the check for this mount.
    ///
    /// Without a stored token no request is made. A token the validator
    /// rejects is cleared before the guard settles. The decision is only
    /// returned once validation has finished.
    pub async fn check<V>(&mut self, store: &dyn TokenStore, validator: &V) -> Decision
    where
        V: SessionValidator + ?Sized,
    {
        self.state = GuardState::Checking;
        self.validity = SessionValidity::Unknown;

        let credential = match store.get() {
            Ok(credential) => credential,
            Err(e) => {
                log::warn!("could not read session token: {}", e);
                None
            }
        };

        let Some(credential) = credential else {
            self.settle(Validity::Invalid);
            return self.decision();
        };

        let validity = validator.validate(&credential).await;
        if validity == Validity::Invalid {
            if let Err(e) = store.clear() {
                log::warn!("could not clear rejected token: {}", e);
            }
        }

        self.settle(validity);
        self.decision()
    }

    fn settle(&mut self, validity: Validity) {
        self.validity = validity.into();
        self.state = match validity {
            Validity::Valid => GuardState::Authenticated,
            Validity::Invalid => GuardState::Unauthenticated,
        };
    }
}

/// Clear the session and send the user back to login.
///
/// Calling this when already logged out has the same effect.
pub fn logout(store: &dyn TokenStore) -> Result<Route> {
    store.clear()?;
    Ok(Route::Login)
}
