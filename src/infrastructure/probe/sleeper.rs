//! Interruptible sleeper
//!
//! Sleeps in short slices so a Ctrl+C handler that clears `running` stops
//! the wait within a fraction of a second.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::ports::Sleeper;

const SLICE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ThreadSleeper {
    running: Arc<AtomicBool>,
}

impl ThreadSleeper {
    pub fn new(running: Arc<AtomicBool>) -> Self {
        Self { running }
    }
}

impl Default for ThreadSleeper {
    fn default() -> Self {
        Self::new(Arc::new(AtomicBool::new(true)))
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        while self.running.load(Ordering::SeqCst) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep(SLICE.min(deadline - now));
        }
    }

    fn is_cancelled(&self) -> bool {
        !self.running.load(Ordering::SeqCst)
    }
}
