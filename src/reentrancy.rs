//! Debug-only reentrancy guard.
//!
//! The map runs user code (`Hash`, `Eq`, `PartialEq`) while probing,
//! sometimes with counters and slots in a transiently inconsistent
//! state. In debug builds, entering a guarded operation while another
//! is still in progress panics; release builds compile the guard away.
//! The raw-pointer marker also keeps the owning structure `!Send` and
//! `!Sync`, matching its single-threaded design.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-map reentrancy flag. Guard public entry points with
/// `let _g = self.reentrancy.enter();`.
#[derive(Debug, Default)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    entered: Cell<bool>,
    _not_send: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            entered: Cell::new(false),
            _not_send: PhantomData,
        }
    }

    /// Enter a guarded section; the returned guard re-arms the flag on
    /// drop. Panics in debug builds if a section is already active.
    #[inline]
    pub(crate) fn enter(&self) -> EnterGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.entered.replace(true),
                "reentrant call into map during a probe"
            );
            EnterGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            EnterGuard { _lt: PhantomData }
        }
    }
}

pub(crate) struct EnterGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _lt: PhantomData<&'a ()>,
}

impl Drop for EnterGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.entered.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::DebugReentrancy;

    #[test]
    fn sequential_entries_are_fine() {
        let r = DebugReentrancy::new();
        drop(r.enter());
        drop(r.enter());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_entry_panics_in_debug() {
        let r = DebugReentrancy::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g1 = r.enter();
            let _g2 = r.enter();
        }));
        assert!(res.is_err());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn flag_rearms_after_panic_guard_drops() {
        let r = DebugReentrancy::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g1 = r.enter();
            let _g2 = r.enter();
        }));
        // The outer guard was dropped during unwinding; entry works again.
        drop(r.enter());
    }
}
