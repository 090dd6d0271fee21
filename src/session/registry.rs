//! Active session registry
//!
//! Tracks the interaction ids of sessions that are currently live. The
//! registry is owned by the hosting application and injected into each
//! session; entries are added on `start` and removed on both terminal
//! transitions (dismiss and timeout).

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::surface::InteractionId;
use crate::{Error, Result};

/// Registry of active session ids
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashSet<InteractionId>>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session as active
    pub fn insert(&self, id: InteractionId) -> Result<()> {
        self.sessions
            .write()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?
            .insert(id);
        Ok(())
    }

    /// Remove a session
    pub fn remove(&self, id: InteractionId) -> Result<()> {
        self.sessions
            .write()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?
            .remove(&id);
        Ok(())
    }

    /// Whether a session is active
    pub fn contains(&self, id: InteractionId) -> Result<bool> {
        Ok(self
            .sessions
            .read()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?
            .contains(&id))
    }

    /// All active session ids
    pub fn active(&self) -> Result<Vec<InteractionId>> {
        Ok(self
            .sessions
            .read()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?
            .iter()
            .copied()
            .collect())
    }

    /// Number of active sessions
    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.session_count(), 0);

        registry.insert(42).unwrap();
        registry.insert(43).unwrap();
        assert_eq!(registry.session_count(), 2);
        assert!(registry.contains(42).unwrap());

        registry.remove(42).unwrap();
        assert!(!registry.contains(42).unwrap());
        assert_eq!(registry.session_count(), 1);
    }

    #[test]
    fn test_remove_absent_is_silent() {
        let registry = SessionRegistry::new();
        registry.remove(99).unwrap();
        assert_eq!(registry.session_count(), 0);
    }

    #[test]
    fn test_shared_between_clones() {
        let registry = SessionRegistry::new();
        let clone = registry.clone();

        registry.insert(1).unwrap();
        assert!(clone.contains(1).unwrap());

        let active = clone.active().unwrap();
        assert_eq!(active, vec![1]);
    }
}
