//! Route table and the authorization gate guarding it.
//!
//! The gate is a pure function over the observed session state, so every
//! redirect rule is table-testable without any I/O.

use crate::models::Role;
use crate::session::{SessionPhase, SessionState};

/// Navigable surfaces of the client, mirroring the app's route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Candidate,
    Recruiter,
    Admin,
    Analytics,
    JobAnalytics,
}

/// What the gate decided for a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session restoration is still running; deciding now would flash a
    /// bogus redirect over a perfectly valid session.
    Pending,
    Render,
    RedirectLogin,
    RedirectHome,
}

/// Roles allowed on a route; `None` means public.
pub fn allowed_roles(route: Route) -> Option<&'static [Role]> {
    match route {
        Route::Login | Route::Register => None,
        Route::Candidate => Some(&[Role::Candidate]),
        Route::Recruiter => Some(&[Role::Recruiter]),
        Route::Admin => Some(&[Role::Admin]),
        Route::Analytics | Route::JobAnalytics => Some(&[Role::Recruiter, Role::Admin]),
    }
}

/// The gate itself: no identity goes to login, a mismatched role goes to the
/// neutral default, and everything else renders.
pub fn decide(session: &SessionState, allowed: Option<&[Role]>) -> RouteDecision {
    if session.phase() == SessionPhase::Restoring {
        return RouteDecision::Pending;
    }
    let Some(allowed) = allowed else {
        return RouteDecision::Render;
    };
    match session.identity() {
        None => RouteDecision::RedirectLogin,
        Some(identity) if allowed.contains(&identity.role) => RouteDecision::Render,
        Some(_) => RouteDecision::RedirectHome,
    }
}

pub fn resolve(route: Route, session: &SessionState) -> RouteDecision {
    decide(session, allowed_roles(route))
}

/// Landing route after login, keyed by role.
pub fn home_for(role: Role) -> Route {
    match role {
        Role::Candidate => Route::Candidate,
        Role::Recruiter => Route::Recruiter,
        Role::Admin => Route::Admin,
    }
}
