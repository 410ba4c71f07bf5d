//! Metric names and recording helpers

use std::time::Instant;

use opentelemetry::{KeyValue, metrics::Histogram};

/// Seconds spent per try-on generation, upstream call included
pub const GENERATION_DURATION: &str = "tryon.generation.duration";

/// Attribute naming how a generation ended
pub const OUTCOME: &str = "outcome";

/// Record the time elapsed since `start` against a generation outcome
pub fn record_generation(histogram: &Histogram<f64>, start: Instant, outcome: &'static str) {
    histogram.record(start.elapsed().as_secs_f64(), &[KeyValue::new(OUTCOME, outcome)]);
}
