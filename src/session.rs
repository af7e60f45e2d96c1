//! Process-wide session identity, injected into every mutating operation.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// The signed-in user as recorded on history entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Shared handle to the current session. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Actor>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(actor: Actor) -> Self {
        let session = Self::new();
        session.sign_in(actor);
        session
    }

    pub fn sign_in(&self, actor: Actor) {
        info!(user_id = %actor.user_id, "session signed in");
        match self.inner.write() {
            Ok(mut slot) => *slot = Some(actor),
            Err(poisoned) => *poisoned.into_inner() = Some(actor),
        }
    }

    pub fn sign_out(&self) {
        match self.inner.write() {
            Ok(mut slot) => *slot = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        info!("session signed out");
    }

    /// The current actor. A poisoned lock reads as signed out.
    pub fn current(&self) -> Option<Actor> {
        match self.inner.read() {
            Ok(slot) => slot.clone(),
            Err(_) => {
                debug!("session lock poisoned; treating as signed out");
                None
            }
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }

    pub fn require(&self) -> Result<Actor, SessionError> {
        self.current().ok_or(SessionError::SignedOut)
    }
}
