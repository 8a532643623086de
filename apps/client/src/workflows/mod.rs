//! Per-role dashboard orchestrators plus the fetch/race utilities they
//! share. Orchestrators own their view state exclusively and never let a
//! failure escape as an `Err`; everything user-visible lands in a transient
//! message.

pub mod analytics;
pub mod candidate;
pub mod recruiter;

use crate::api::ApiError;

pub(crate) const SESSION_LOST: &str = "Session expired. Please log in again.";

/// Tracks which fetch of a target collection is current. Every refresh bumps
/// the generation at issue time; a completion applies only if its generation
/// is still the newest, so late responses for superseded requests are
/// dropped instead of overwriting fresher state.
#[derive(Debug, Default)]
pub(crate) struct FetchGen(u64);

impl FetchGen {
    pub fn begin(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, issued: u64) -> bool {
        self.0 == issued
    }
}

/// Candidate-style failure display: prefer the server's structured detail.
pub(crate) fn detail_or(error: &ApiError, fallback: &str) -> String {
    if error.is_unauthorized() {
        return SESSION_LOST.to_string();
    }
    error.message_or(fallback).to_string()
}

/// Recruiter-style failure display: always the action's generic message.
/// Only credential rejection overrides it, because that is session loss, not
/// an action failure.
pub(crate) fn generic_or_session_loss(error: &ApiError, generic: &str) -> String {
    if error.is_unauthorized() {
        return SESSION_LOST.to_string();
    }
    generic.to_string()
}
