use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

/// Cooperative cancellation flag shared between a solver and its caller.
///
/// Cancellation is advisory: running computations poll the flag at iteration
/// boundaries and between elimination steps and return their best-so-far
/// result without corrupting any data structure.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Raises the flag once `max_duration` has elapsed.
    pub fn cancel_after(&self, max_duration: Duration) {
        let flag = self.flag.clone();
        let start_time = SystemTime::now();
        thread::Builder::new()
            .name("cancellation".into())
            .spawn(move || loop {
                thread::sleep(Duration::from_millis(10));
                if start_time
                    .elapsed()
                    .expect("failed to obtain elapsed time")
                    > max_duration
                {
                    flag.store(true, Ordering::SeqCst);
                    break;
                }
            })
            .expect("failed to spawn thread");
    }
}

#[cfg(test)]
mod tests {
    use super::Cancellation;

    #[test]
    fn cancel_is_visible_through_clones() {
        let cancellation = Cancellation::new();
        let handle = cancellation.clone();
        assert!(!cancellation.is_cancelled());
        handle.cancel();
        assert!(cancellation.is_cancelled());
    }
}
