//! Motion detector input seam

use std::sync::atomic::{AtomicBool, Ordering};

/// One digital input line from a motion sensor
pub trait MotionInput: Send + Sync {
    fn is_high(&self) -> bool;
}

/// Settable level, for boards without a PIR sensor wired up and for tests
#[derive(Debug, Default)]
pub struct LevelMotion {
    level: AtomicBool,
}

impl LevelMotion {
    pub fn new(level: bool) -> Self {
        Self {
            level: AtomicBool::new(level),
        }
    }

    pub fn set(&self, level: bool) {
        self.level.store(level, Ordering::Release);
    }
}

impl MotionInput for LevelMotion {
    fn is_high(&self) -> bool {
        self.level.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_tracks_set() {
        let input = LevelMotion::new(false);
        assert!(!input.is_high());
        input.set(true);
        assert!(input.is_high());
    }
}
