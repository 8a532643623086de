use std::fs;
use std::io;
use std::path::PathBuf;

use tokio::sync::watch;

use crate::models::{Credential, Identity};

/// Where the session lifecycle currently stands. Route decisions must not be
/// made while `Restoring` — that is the flash-redirect bug class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Restoring,
    Ready,
}

/// One observable snapshot of the session. The credential inside is only
/// reachable from within the crate; everything outside the session layer
/// sees an `Identity` at most.
#[derive(Debug, Clone)]
pub struct SessionState {
    phase: SessionPhase,
    credential: Option<Credential>,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn identity(&self) -> Option<Identity> {
        self.credential.as_ref().map(|c| Identity { role: c.role })
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.credential.as_ref().map(|c| c.token.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("could not access the session file: {0}")]
    Io(#[from] io::Error),

    #[error("session file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Process-wide holder of the credential. Single writer (the session
/// manager); all other components read snapshots or subscribe to changes.
///
/// The watch channel doubles as the mutable cell and the change broadcast,
/// so readers can never observe a torn phase/credential pair.
pub struct SessionStore {
    path: PathBuf,
    tx: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Starts in `Restoring`; the session manager transitions it to `Ready`
    /// exactly once at startup.
    pub fn new(path: PathBuf) -> Self {
        let (tx, _rx) = watch::channel(SessionState {
            phase: SessionPhase::Restoring,
            credential: None,
        });
        Self { path, tx }
    }

    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.tx.borrow().phase
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state().identity()
    }

    /// Current bearer token, cloned out for request construction.
    pub(crate) fn token(&self) -> Option<String> {
        self.tx.borrow().token().map(str::to_owned)
    }

    /// Change notifications, for anything that re-renders on session flips.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub(crate) fn set_credential(&self, credential: Credential) {
        self.tx.send_replace(SessionState {
            phase: SessionPhase::Ready,
            credential: Some(credential),
        });
    }

    pub(crate) fn clear_credential(&self) {
        self.tx.send_replace(SessionState {
            phase: SessionPhase::Ready,
            credential: None,
        });
    }

    /// Leaves any credential in place and ends the restoring phase.
    pub(crate) fn mark_ready(&self) {
        self.tx.send_modify(|state| state.phase = SessionPhase::Ready);
    }

    pub(crate) fn save_to_disk(&self, credential: &Credential) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub(crate) fn load_from_disk(&self) -> Result<Option<Credential>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn remove_from_disk(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
