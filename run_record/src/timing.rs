use std::fmt;
use std::time::{Duration, Instant};

/// Labelled wall-clock stopwatch for one phase of a smoke-test run.
pub struct Stopwatch {
    label: String,
    start: Instant,
    elapsed: Option<Duration>,
}

impl Stopwatch {
    pub fn start(label: &str) -> Stopwatch {
        Stopwatch {
            label: label.to_string(),
            start: Instant::now(),
            elapsed: None,
        }
    }

    pub fn stop(mut self) -> Stopwatch {
        self.elapsed = Some(self.start.elapsed());
        self
    }

    /// Recorded duration if stopped, time since start otherwise.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.start.elapsed())
    }

    pub fn secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{\"label\": \"{}\", \"elapsed_seconds\": {}}}",
            self.label,
            self.secs()
        )
    }
}
