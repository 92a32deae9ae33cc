use std::time::Duration;

/// Pauses the current thread between attempts.
pub trait Sleeper {
    fn sleep(&mut self, delay: Duration);
}

/// Blocks the calling thread with `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
