//! Per-session continuation registry.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use super::{Action, CallerId, PendingContinuation, SessionId};
use crate::error::RelayError;
use crate::services::{OutboundResult, ServiceHub};
use crate::Result;

/// Outcome of resolving a continuation against a follow-up message.
#[derive(Debug)]
pub struct Resolution {
    /// Action the continuation was armed for.
    pub action: Action,
    /// Result reported by the outbound service.
    pub result: OutboundResult,
}

/// Thread-safe map from session to its single pending continuation.
///
/// Arming replaces any previous continuation for the session. Resolving
/// removes the continuation before the service is called, so it fires at
/// most once whatever the outcome.
pub struct ContinuationRegistry {
    pending: RwLock<HashMap<SessionId, PendingContinuation>>,
}

impl ContinuationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            pending: RwLock::new(HashMap::new()),
        }
    }

    /// Arm a continuation for the session.
    ///
    /// Returns the continuation that was replaced, if any.
    pub fn arm(&self, session: SessionId, action: Action) -> Result<Option<PendingContinuation>> {
        let mut pending = self
            .pending
            .write()
            .map_err(|_| RelayError::LockPoisoned)?;

        let replaced = pending.insert(session, PendingContinuation::new(action));
        if let Some(previous) = &replaced {
            debug!(
                session = %session,
                previous = %previous.action,
                action = %action,
                "replaced unresolved continuation"
            );
        }
        Ok(replaced)
    }

    /// Get a copy of the continuation pending for the session.
    pub fn pending(&self, session: SessionId) -> Result<Option<PendingContinuation>> {
        let pending = self
            .pending
            .read()
            .map_err(|_| RelayError::LockPoisoned)?;
        Ok(pending.get(&session).copied())
    }

    /// Remove and return the continuation pending for the session.
    pub fn take(&self, session: SessionId) -> Result<Option<PendingContinuation>> {
        let mut pending = self
            .pending
            .write()
            .map_err(|_| RelayError::LockPoisoned)?;
        Ok(pending.remove(&session))
    }

    /// Drop the continuation pending for the session.
    ///
    /// Returns whether one was present.
    pub fn clear(&self, session: SessionId) -> Result<bool> {
        Ok(self.take(session)?.is_some())
    }

    /// Resolve the session's continuation with the follow-up text.
    ///
    /// Returns `None` when nothing was armed. The continuation is cleared
    /// before the service runs, so a continuation armed while the call is
    /// in flight survives it.
    pub async fn resolve(
        &self,
        session: SessionId,
        caller: CallerId,
        text: &str,
        services: &ServiceHub,
    ) -> Result<Option<Resolution>> {
        let Some(continuation) = self.take(session)? else {
            return Ok(None);
        };

        let action = continuation.action;
        debug!(session = %session, action = %action, "resolving continuation");
        let result = services.call(action, caller, text).await;

        Ok(Some(Resolution { action, result }))
    }

    /// Get the number of sessions with a pending continuation.
    pub fn count(&self) -> usize {
        self.pending.read().map(|p| p.len()).unwrap_or(0)
    }
}

#[cfg(test)]
impl ContinuationRegistry {
    /// Poison the lock by panicking while holding it.
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.pending.write();
            panic!("registry lock poisoned on purpose");
        }));
    }
}

impl Default for ContinuationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
