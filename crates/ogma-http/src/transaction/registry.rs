//! Execution contexts and the transaction registry
//!
//! A transaction is current *per logical execution context*, never globally.
//! The context is an explicit capability passed on every driver call, so
//! concurrent contexts stay isolated without ambient thread-local state.
//! The registry maps a context to the URL of its active transaction; the
//! handle itself stays exclusively owned by the caller that began it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identity of one logical execution context (one caller's session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecutionContext(u64);

impl ExecutionContext {
    /// Mint a context distinct from every other context in this process
    pub fn new() -> Self {
        Self(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of active transactions, keyed by execution context
///
/// Cheap to clone; all clones share the same bindings.
#[derive(Debug, Clone, Default)]
pub struct TransactionRegistry {
    bindings: Arc<Mutex<HashMap<ExecutionContext, String>>>,
}

impl TransactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the context's active transaction, if one is open
    pub fn current_transaction(&self, context: ExecutionContext) -> Option<String> {
        self.bindings.lock().ok()?.get(&context).cloned()
    }

    /// Bind a freshly begun transaction to its owning context
    pub(crate) fn bind(&self, context: ExecutionContext, url: &str) -> Result<()> {
        let mut bindings = self
            .bindings
            .lock()
            .map_err(|_| Error::execution("transaction registry lock poisoned"))?;
        if bindings.contains_key(&context) {
            return Err(Error::usage(
                "execution context already has an active transaction",
            ));
        }
        bindings.insert(context, url.to_string());
        Ok(())
    }

    /// Drop the context's binding once its transaction reaches a terminal state
    pub(crate) fn release(&self, context: ExecutionContext) {
        if let Ok(mut bindings) = self.bindings.lock() {
            bindings.remove(&context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contexts_are_distinct() {
        assert_ne!(ExecutionContext::new(), ExecutionContext::new());
    }

    #[test]
    fn test_bind_and_release() {
        let registry = TransactionRegistry::new();
        let context = ExecutionContext::new();

        assert!(registry.current_transaction(context).is_none());

        registry.bind(context, "http://h/db/data/transaction/17").unwrap();
        assert_eq!(
            registry.current_transaction(context).as_deref(),
            Some("http://h/db/data/transaction/17")
        );

        registry.release(context);
        assert!(registry.current_transaction(context).is_none());
    }

    #[test]
    fn test_double_bind_is_usage_error() {
        let registry = TransactionRegistry::new();
        let context = ExecutionContext::new();

        registry.bind(context, "http://h/db/data/transaction/1").unwrap();
        assert!(matches!(
            registry.bind(context, "http://h/db/data/transaction/2"),
            Err(Error::Usage { .. })
        ));
    }

    #[test]
    fn test_contexts_are_isolated() {
        let registry = TransactionRegistry::new();
        let first = ExecutionContext::new();
        let second = ExecutionContext::new();

        registry.bind(first, "http://h/db/data/transaction/1").unwrap();
        assert!(registry.current_transaction(second).is_none());

        registry.release(second);
        assert!(registry.current_transaction(first).is_some());
    }
}
