//! Thread-scoped context folded into every failure message.
//!
//! Code that wants to tag failures with request-level details (a request id,
//! the current tenant) enters an ambient scope. Entries live until their
//! guard is dropped and are only visible on the thread that created them.
//!
//! Ambient entries have the lowest precedence: a key defined by the failure
//! itself, the validator, or its factory wins.
//!
//! ```rust,ignore
//! let _request = AmbientContext::enter("request_id", "r-42".to_string());
//! check_if(5, "count").is_less_than(3).else_throw()?;
//! // message contains: request_id: "r-42"
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::mappers::ContextValue;
use crate::validator::Context;

thread_local! {
    static AMBIENT: RefCell<Vec<(String, Arc<dyn ContextValue>)>> = const { RefCell::new(Vec::new()) };
}

/// Access to the current thread's ambient context.
#[derive(Debug, Clone, Copy)]
pub struct AmbientContext;

impl AmbientContext {
    /// Adds an entry until the returned guard is dropped.
    ///
    /// Entering a name that is already present shadows it; dropping the guard
    /// restores the previous value.
    #[must_use = "the entry is removed when the guard is dropped"]
    pub fn enter(name: impl Into<String>, value: impl ContextValue) -> AmbientGuard {
        let name = name.into();
        crate::validator::require_valid_name(&name);
        let value: Arc<dyn ContextValue> = Arc::new(value);
        let depth = AMBIENT.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push((name, value));
            stack.len() - 1
        });
        AmbientGuard {
            depth,
            _thread_bound: PhantomData,
        }
    }

    /// Runs `f` with an extra entry in scope.
    pub fn scope_sync<R>(name: impl Into<String>, value: impl ContextValue, f: impl FnOnce() -> R) -> R {
        let _guard = Self::enter(name, value);
        f()
    }

    /// The entries in scope, innermost value winning for each name.
    pub fn snapshot() -> Context {
        AMBIENT.with(|stack| {
            let mut context = Context::new();
            for (name, value) in stack.borrow().iter() {
                context.insert(name.clone(), Arc::clone(value));
            }
            context
        })
    }

    /// Returns `true` if no entries are in scope.
    pub fn is_empty() -> bool {
        AMBIENT.with(|stack| stack.borrow().is_empty())
    }
}

/// Removes an ambient entry when dropped.
///
/// The guard cannot leave the thread that created it.
#[derive(Debug)]
pub struct AmbientGuard {
    depth: usize,
    _thread_bound: PhantomData<*const ()>,
}

impl Drop for AmbientGuard {
    fn drop(&mut self) {
        AMBIENT.with(|stack| stack.borrow_mut().truncate(self.depth));
    }
}
