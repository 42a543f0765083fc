//! Only one animal talks at a time.
//!
//! Callers ask the gate for a session before playing an animal's audio and
//! hand the token back when the clip ends. A second animal asking while a
//! session is open is turned away.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakingSession {
    pub token: Uuid,
    pub animal_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeakingError {
    #[error("{0} is already speaking")]
    Busy(String),
}

#[derive(Clone, Default)]
pub struct SpeakingGate {
    active: Arc<Mutex<Option<SpeakingSession>>>,
}

impl SpeakingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `animal_id` unless another animal holds the gate
    pub fn begin(&self, animal_id: &str) -> Result<SpeakingSession, SpeakingError> {
        let mut active = self.lock();
        if let Some(current) = active.as_ref() {
            debug!("{} asked to speak while {} is speaking", animal_id, current.animal_id);
            return Err(SpeakingError::Busy(current.animal_id.clone()));
        }

        let session = SpeakingSession {
            token: Uuid::new_v4(),
            animal_id: animal_id.to_string(),
        };
        *active = Some(session.clone());
        info!("{} started speaking", animal_id);
        Ok(session)
    }

    /// Close the session identified by `token`. Stale tokens are ignored.
    pub fn end(&self, token: Uuid) -> bool {
        let mut active = self.lock();
        match active.as_ref() {
            Some(current) if current.token == token => {
                info!("{} finished speaking", current.animal_id);
                *active = None;
                true
            }
            _ => {
                debug!("Ignoring stale speaking token {}", token);
                false
            }
        }
    }

    /// Animal currently speaking, if any
    pub fn current(&self) -> Option<String> {
        self.lock().as_ref().map(|session| session.animal_id.clone())
    }

    /// Open a session that closes itself when the guard is dropped
    pub fn acquire(&self, animal_id: &str) -> Result<SpeakingGuard, SpeakingError> {
        let session = self.begin(animal_id)?;
        Ok(SpeakingGuard {
            gate: self.clone(),
            session,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Option<SpeakingSession>> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Holds the gate for one animal until dropped
pub struct SpeakingGuard {
    gate: SpeakingGate,
    session: SpeakingSession,
}

impl SpeakingGuard {
    pub fn session(&self) -> &SpeakingSession {
        &self.session
    }
}

impl Drop for SpeakingGuard {
    fn drop(&mut self) {
        self.gate.end(self.session.token);
    }
}
