//! Call-scoped gesture flags
//!
//! The fallback gesture handlers run deep inside the restricted engine's
//! interactive loop, in code the adapter does not otherwise control. Two
//! flags cross that call boundary: "arm on next invocation", set by the
//! adapter immediately before delegating, and "active for this call",
//! derived from it by the engine's entry point and held for the duration
//! of that one nested call.
//!
//! Both flags are scoped to one call stack: [`SessionFlags::begin_call`]
//! returns an RAII guard that saves the surrounding values and restores
//! them on drop, so a nested completion request started from within an
//! outer one never observes or corrupts the outer request's state.
//!
//! The fields are atomics only because key handlers must be `Send + Sync`;
//! everything here runs on one thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared gesture-flag state for one adapter/engine pairing.
#[derive(Clone, Default)]
pub struct SessionFlags {
    inner: Arc<FlagState>,
}

#[derive(Default)]
struct FlagState {
    /// Set by the adapter right before delegating to the restricted engine
    arm_next: AtomicBool,

    /// Set while an adapter-initiated restricted call is on the stack
    active: AtomicBool,

    /// Set by a gesture handler to request fallback for the current call
    requested: AtomicBool,
}

impl SessionFlags {
    /// Create a fresh set of flags, all cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the next restricted-engine invocation.
    pub fn arm(&self) {
        self.inner.arm_next.store(true, Ordering::Relaxed);
    }

    /// Enter a restricted-engine call.
    ///
    /// Consumes the armed flag into the call-active flag and clears any
    /// stale fallback request. The returned guard restores the surrounding
    /// call's values when dropped.
    pub fn begin_call(&self) -> CallScope {
        let armed = self.inner.arm_next.swap(false, Ordering::Relaxed);
        let prev_active = self.inner.active.swap(armed, Ordering::Relaxed);
        let prev_requested = self.inner.requested.swap(false, Ordering::Relaxed);

        CallScope {
            flags: self.clone(),
            prev_active,
            prev_requested,
        }
    }

    /// Whether the current call was initiated by the adapter.
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Relaxed)
    }

    /// Record the user's fallback gesture for the current call.
    pub fn request_fallback(&self) {
        self.inner.requested.store(true, Ordering::Relaxed);
    }

    /// Consume a pending fallback request.
    pub fn take_fallback_request(&self) -> bool {
        self.inner.requested.swap(false, Ordering::Relaxed)
    }
}

/// RAII scope for one restricted-engine call.
///
/// Holds the saved flag values of the enclosing call and writes them back
/// on drop.
pub struct CallScope {
    flags: SessionFlags,
    prev_active: bool,
    prev_requested: bool,
}

impl CallScope {
    /// Whether this call was initiated by the adapter.
    pub fn is_active(&self) -> bool {
        self.flags.is_active()
    }
}

impl Drop for CallScope {
    fn drop(&mut self) {
        self.flags
            .inner
            .active
            .store(self.prev_active, Ordering::Relaxed);
        self.flags
            .inner
            .requested
            .store(self.prev_requested, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_is_consumed_by_one_call() {
        let flags = SessionFlags::new();
        flags.arm();

        {
            let scope = flags.begin_call();
            assert!(scope.is_active());
        }

        // A second call without re-arming is not adapter-initiated
        let scope = flags.begin_call();
        assert!(!scope.is_active());
    }

    #[test]
    fn test_fallback_request_roundtrip() {
        let flags = SessionFlags::new();
        flags.arm();
        let _scope = flags.begin_call();

        assert!(!flags.take_fallback_request());
        flags.request_fallback();
        assert!(flags.take_fallback_request());
        // Consumed
        assert!(!flags.take_fallback_request());
    }

    #[test]
    fn test_nested_call_restores_outer_state() {
        let flags = SessionFlags::new();
        flags.arm();
        let outer = flags.begin_call();
        assert!(outer.is_active());
        flags.request_fallback();

        {
            // Nested invocation that was not armed: inactive, and it must
            // not see or clobber the outer call's pending request
            let inner = flags.begin_call();
            assert!(!inner.is_active());
            assert!(!flags.take_fallback_request());
        }

        // Outer state restored after the nested call unwinds
        assert!(outer.is_active());
        assert!(flags.take_fallback_request());
    }

    #[test]
    fn test_nested_armed_call() {
        let flags = SessionFlags::new();
        let outer = flags.begin_call();
        assert!(!outer.is_active());

        flags.arm();
        {
            let inner = flags.begin_call();
            assert!(inner.is_active());
        }

        assert!(!flags.is_active());
    }
}
