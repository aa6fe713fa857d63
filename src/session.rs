//! Stream session coordination

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide cooperative stop flag shared by all streaming sessions.
///
/// `/stop` on the control listener arms it; every streaming session clears it
/// unconditionally on entry and polls it once per loop iteration. There is no
/// per-session scoping: an armed signal terminates whichever loops are
/// currently polling it, video and audio alike.
#[derive(Debug, Default)]
pub struct StopSignal {
    requested: AtomicBool,
}

impl StopSignal {
    pub fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Arm the signal. Running loops terminate at their next iteration.
    pub fn request_stop(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Disarm the signal, called on streaming session entry.
    pub fn clear(&self) {
        self.requested.store(false, Ordering::Release);
    }

    /// Poll the signal; does not consume it.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disarmed() {
        assert!(!StopSignal::new().is_requested());
    }

    #[test]
    fn arm_and_clear() {
        let signal = StopSignal::new();
        signal.request_stop();
        assert!(signal.is_requested());
        // Polling does not consume it
        assert!(signal.is_requested());

        signal.clear();
        assert!(!signal.is_requested());
    }

    #[test]
    fn arming_twice_is_idempotent() {
        let signal = StopSignal::new();
        signal.request_stop();
        signal.request_stop();
        assert!(signal.is_requested());
        signal.clear();
        assert!(!signal.is_requested());
    }
}
