use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub struct Metrics {
    // Requests
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,

    // Model calls, one per attempt
    model_calls: AtomicUsize,
    failed_model_calls: AtomicUsize,

    // Output
    transcripts_generated: AtomicUsize,
    turns_generated: AtomicUsize,
    degraded_turns: AtomicUsize,

    // Timing (in microseconds)
    total_generation_time_us: AtomicU64,
    total_model_time_us: AtomicU64,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            model_calls: AtomicUsize::new(0),
            failed_model_calls: AtomicUsize::new(0),
            transcripts_generated: AtomicUsize::new(0),
            turns_generated: AtomicUsize::new(0),
            degraded_turns: AtomicUsize::new(0),
            total_generation_time_us: AtomicU64::new(0),
            total_model_time_us: AtomicU64::new(0),
        })
    }

    pub fn record_request(&self, success: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_model_call(&self, duration: Duration, success: bool) {
        self.model_calls.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.failed_model_calls.fetch_add(1, Ordering::Relaxed);
        }
        self.total_model_time_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_transcript(&self, duration: Duration, turns: usize, degraded: usize) {
        self.transcripts_generated.fetch_add(1, Ordering::Relaxed);
        self.turns_generated.fetch_add(turns, Ordering::Relaxed);
        self.degraded_turns.fetch_add(degraded, Ordering::Relaxed);
        self.total_generation_time_us.fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            model_calls: self.model_calls.load(Ordering::Relaxed),
            failed_model_calls: self.failed_model_calls.load(Ordering::Relaxed),
            transcripts_generated: self.transcripts_generated.load(Ordering::Relaxed),
            turns_generated: self.turns_generated.load(Ordering::Relaxed),
            degraded_turns: self.degraded_turns.load(Ordering::Relaxed),
            avg_generation_time_ms: self
                .avg_time_ms(&self.total_generation_time_us, &self.transcripts_generated),
            avg_model_call_time_ms: self.avg_time_ms(&self.total_model_time_us, &self.model_calls),
        }
    }

    fn avg_time_ms(&self, total_us: &AtomicU64, count: &AtomicUsize) -> f64 {
        let total = total_us.load(Ordering::Relaxed) as f64;
        let cnt = count.load(Ordering::Relaxed) as f64;
        if cnt > 0.0 {
            total / cnt / 1000.0 // Convert to ms
        } else {
            0.0
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub model_calls: usize,
    pub failed_model_calls: usize,
    pub transcripts_generated: usize,
    pub turns_generated: usize,
    pub degraded_turns: usize,
    pub avg_generation_time_ms: f64,
    pub avg_model_call_time_ms: f64,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
