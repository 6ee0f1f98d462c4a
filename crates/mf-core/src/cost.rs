//! Injectable cost models and lightweight timing utilities.
//!
//! Synthetic components model an expensive analysis by charging a fixed
//! duration per solve. The charge goes through a `CostModel` so production
//! code blocks for real wall-clock time while tests account for the cost
//! without sleeping.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Sink for simulated computation cost.
///
/// A charge is unconditional: there is no cancellation or timeout, the
/// duration is a fixed simulated cost rather than a bounded wait.
pub trait CostModel: Send + Sync {
    /// Charge one solve's worth of simulated cost.
    fn charge(&self, cost: Duration);
}

/// Blocks the calling thread for the full cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl CostModel for WallClock {
    fn charge(&self, cost: Duration) {
        if !cost.is_zero() {
            std::thread::sleep(cost);
        }
    }
}

/// Discards all charged cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCost;

impl CostModel for NoCost {
    fn charge(&self, _cost: Duration) {}
}

/// Accumulates charged cost without blocking. Intended for tests.
#[derive(Debug, Default)]
pub struct Recording {
    total_ns: AtomicU64,
    count: AtomicU64,
}

impl Recording {
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Total cost charged so far.
    pub fn total(&self) -> Duration {
        Duration::from_nanos(self.total_ns.load(Ordering::Relaxed))
    }

    /// Number of charges.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Clear accumulated cost.
    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
    }
}

impl CostModel for Recording {
    fn charge(&self, cost: Duration) {
        self.total_ns
            .fetch_add(cost.as_nanos() as u64, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable timing output globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disable timing output globally.
pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Check if timing output is enabled (programmatically or via `MF_TIMING`).
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("MF_TIMING").is_ok()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
    enabled: bool,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If timing is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        self.enabled.then(|| self.start.elapsed().as_secs_f64())
    }

    /// Stop the timer and print the result if enabled.
    pub fn stop_and_print(self) {
        let label = self.label;
        if let Some(elapsed) = self.stop() {
            println!("[TIMING] {}: {:.3}s", label, elapsed);
        }
    }
}
