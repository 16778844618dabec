//! Session validation and route protection.

mod guard;
mod route;
mod validator;

pub use guard::{logout, Decision, GuardPolicy, GuardState, RouteGuard};
pub use route::Route;
pub use validator::{HttpSessionValidator, SessionValidator, SessionValidity, Validity, WHO_AM_I};
