//! Nullable round source — scripted load results.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use feeburn_dashboard::{DataOrigin, RoundSource};
use feeburn_types::Round;

/// A round source that returns queued results in order.
///
/// Once the queue is empty, every load fails with `"no scripted result"`.
pub struct NullRoundSource {
    origin: DataOrigin,
    results: Mutex<VecDeque<Result<Round, String>>>,
    loads: AtomicUsize,
}

impl NullRoundSource {
    pub fn new(origin: DataOrigin) -> Self {
        Self {
            origin,
            results: Mutex::new(VecDeque::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Queue the result of a future load.
    pub fn push(self, result: Result<Round, String>) -> Self {
        if let Ok(mut results) = self.results.lock() {
            results.push_back(result);
        }
        self
    }

    /// Number of loads started.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl RoundSource for NullRoundSource {
    fn origin(&self) -> DataOrigin {
        self.origin
    }

    async fn load(&self) -> Result<Round, String> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or_else(|| Err("no scripted result".to_string()))
    }
}
