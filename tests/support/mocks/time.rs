// tests/support/mocks/time.rs
use chrono::{DateTime, Duration, TimeZone, Utc};
use mebel_blog::application::ports::time::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Clock that moves one second forward on every reading, so successive
/// writes get distinct, increasing timestamps.
#[derive(Default)]
pub struct StepClock {
    ticks: AtomicI64,
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        base_time() + Duration::seconds(tick)
    }
}
