//! External cancellation signals
//!
//! A [`CancelSignal`] is a polled predicate supplied by the caller: "should
//! this run be aborted now?". The supervisor never owns its source of truth;
//! it reads the signal once per poll tick. Implementations are responsible
//! for their own thread-safety.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled abort predicate for a supervised run
pub trait CancelSignal: Send + Sync {
    /// Whether the current run should be aborted
    fn should_cancel(&self) -> bool;
}

impl<F> CancelSignal for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn should_cancel(&self) -> bool {
        self()
    }
}

/// Shared boolean cancel signal
///
/// Cloneable handle around an atomic flag; one side calls
/// [`trigger`](Self::trigger) (e.g. a Ctrl-C handler or an orchestrator's
/// stop hook), the supervisor polls the other.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a new, untriggered flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run polling this flag
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl CancelSignal for CancelFlag {
    fn should_cancel(&self) -> bool {
        self.is_triggered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_starts_untriggered() {
        let flag = CancelFlag::new();
        assert!(!flag.should_cancel());
    }

    #[test]
    fn test_trigger_is_visible_through_clones() {
        let flag = CancelFlag::new();
        let observer = flag.clone();
        flag.trigger();
        assert!(observer.should_cancel());
        assert!(observer.is_triggered());
    }

    #[test]
    fn test_closure_is_a_signal() {
        let signal = || true;
        assert!(signal.should_cancel());

        let never = || false;
        assert!(!never.should_cancel());
    }
}
