use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that stands still until it is moved, for driving sweeps
/// over several days in tests
pub struct StaticSys {
    now: AtomicI64,
}

impl StaticSys {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set_timestamp_millis(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance_millis(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl ISys for StaticSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_sys_only_moves_when_told() {
        let sys = StaticSys::new(1000);
        assert_eq!(sys.get_timestamp_millis(), 1000);
        sys.advance_millis(500);
        assert_eq!(sys.get_timestamp_millis(), 1500);
        sys.set_timestamp_millis(0);
        assert_eq!(sys.get_timestamp_millis(), 0);
    }
}
