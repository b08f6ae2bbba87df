/// Running latency total for a single worker.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WorkerStats {
    total_secs: f64,
    samples: u32,
}

impl WorkerStats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, elapsed_secs: f64) {
        self.total_secs += elapsed_secs;
        self.samples += 1;
    }

    /// Mean of everything recorded so far, 0.0 before any sample.
    #[must_use]
    pub(crate) fn mean(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.total_secs / f64::from(self.samples)
        }
    }
}

/// Unweighted arithmetic mean, 0.0 for an empty slice.
#[must_use]
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
