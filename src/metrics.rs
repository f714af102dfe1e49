use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;

/// Global counters for one agent run.
///
/// Purpose:
/// - Show how much was collected per run
/// - Make swallowed failures visible (fetch, insights, parse, dispatch)
///
/// Design:
/// - Lock-free (Atomics)
/// - Printed once as a single `[METRICS]` line at the end of `main`
#[derive(Default)]
pub struct RunMetrics {
    // Collection
    pub accounts_collected: AtomicUsize,
    pub posts_collected: AtomicUsize,

    // Swallowed failures
    pub fetch_failures: AtomicUsize,
    pub insight_failures: AtomicUsize,
    pub metric_parse_errors: AtomicUsize,

    // Dispatch
    pub dispatches_sent: AtomicUsize,
    pub dispatch_errors: AtomicUsize,
}

impl RunMetrics {
    pub fn summary_line(&self) -> String {
        format!(
            "[METRICS] accounts={} posts={} fetch_err={} insight_err={} parse_err={} sent={} send_err={}",
            self.accounts_collected.load(Ordering::Relaxed),
            self.posts_collected.load(Ordering::Relaxed),
            self.fetch_failures.load(Ordering::Relaxed),
            self.insight_failures.load(Ordering::Relaxed),
            self.metric_parse_errors.load(Ordering::Relaxed),
            self.dispatches_sent.load(Ordering::Relaxed),
            self.dispatch_errors.load(Ordering::Relaxed),
        )
    }
}

/// Global metrics registry (singleton)
pub static METRICS: Lazy<Arc<RunMetrics>> =
    Lazy::new(|| Arc::new(RunMetrics::default()));
