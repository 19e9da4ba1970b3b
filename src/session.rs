//! Read-only views of session and cluster state, injected into the client.
//!
//! The client reads the current token and selected node at call time and
//! never writes them back; reacting to an invalid token is the owner's job.
use std::sync::{Arc, RwLock};

pub trait TokenProvider: Send + Sync {
    /// Current session token, or `None` when not signed in.
    fn token(&self) -> Option<String>;
}

pub trait NodeSelector: Send + Sync {
    /// Cluster node the caller is looking at, or `None` for the local node.
    fn selected_node(&self) -> Option<String>;
}

/// Fixed token, e.g. an API token from the command line.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// No token and no node selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl TokenProvider for Anonymous {
    fn token(&self) -> Option<String> {
        None
    }
}

impl NodeSelector for Anonymous {
    fn selected_node(&self) -> Option<String> {
        None
    }
}

/// Fixed node selection.
#[derive(Debug, Clone)]
pub struct FixedNode(pub Option<String>);

impl NodeSelector for FixedNode {
    fn selected_node(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Shared, externally updated slot, for owners that swap the token or
/// node while clients are alive (sign-in, node picker).
#[derive(Debug, Clone, Default)]
pub struct SharedSlot(Arc<RwLock<Option<String>>>);

impl SharedSlot {
    pub fn new(initial: Option<String>) -> Self {
        SharedSlot(Arc::new(RwLock::new(initial)))
    }

    pub fn set(&self, value: Option<String>) {
        match self.0.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    pub fn get(&self) -> Option<String> {
        match self.0.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TokenProvider for SharedSlot {
    fn token(&self) -> Option<String> {
        self.get()
    }
}

impl NodeSelector for SharedSlot {
    fn selected_node(&self) -> Option<String> {
        self.get()
    }
}

impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

impl<T: NodeSelector + ?Sized> NodeSelector for Arc<T> {
    fn selected_node(&self) -> Option<String> {
        (**self).selected_node()
    }
}
