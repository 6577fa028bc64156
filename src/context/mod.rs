//! Scoped access to the session store.
//!
//! Code that is handed an `Arc<AppStore>` should just use it. This module is
//! for consumers deep in a call tree: the entry point wraps work in
//! [`provide`], and anything running inside that scope on the same thread can
//! call [`current`]. Outside every scope, [`current`] returns
//! [`ContextError::MissingProvider`]; callers propagate it rather than falling
//! back to some default store.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use crate::state::AppStore;

thread_local! {
    static PROVIDERS: RefCell<Vec<Arc<AppStore>>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContextError {
    MissingProvider,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::MissingProvider => {
                write!(f, "store accessed outside of a provider scope")
            }
        }
    }
}

impl std::error::Error for ContextError {}

/// Pops the provider on scope exit, unwinding included.
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        PROVIDERS.with(|p| {
            p.borrow_mut().pop();
        });
    }
}

/// Run `f` with `store` as the current store. Scopes nest; the innermost wins.
pub fn provide<R>(store: Arc<AppStore>, f: impl FnOnce() -> R) -> R {
    PROVIDERS.with(|p| p.borrow_mut().push(store));
    let _guard = ScopeGuard;
    f()
}

/// Store of the innermost enclosing [`provide`] scope.
pub fn current() -> Result<Arc<AppStore>, ContextError> {
    PROVIDERS.with(|p| p.borrow().last().cloned().ok_or(ContextError::MissingProvider))
}
