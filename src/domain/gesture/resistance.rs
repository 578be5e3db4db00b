/// Tolerance used when comparing a resisted distance with the threshold.
pub const THRESHOLD_EPSILON: f64 = 1e-6;

/// Rubber-band mapping from raw finger travel to displayed pull distance.
///
/// `resisted = max_pull * (1 - e^(-raw / k))`, with `k` solved so that a raw
/// pull equal to `threshold` displays exactly `threshold`. When
/// `threshold >= max_pull` there is no such `k` and `k = max_pull` is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceCurve {
    threshold: f64,
    max_pull: f64,
    k: f64,
}

impl ResistanceCurve {
    /// Both inputs must be positive and finite (see `PullToRefreshOptions::validate`).
    pub fn new(threshold: f64, max_pull: f64) -> Self {
        let ratio = threshold / max_pull;
        let k = if ratio >= 1.0 { max_pull } else { -threshold / (1.0 - ratio).ln() };
        Self { threshold, max_pull, k }
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn max_pull(&self) -> f64 {
        self.max_pull
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn apply(&self, raw_delta: f64) -> f64 {
        if !(raw_delta > 0.0) {
            return 0.0;
        }
        let resisted = self.max_pull * (1.0 - (-raw_delta / self.k).exp());
        resisted.min(self.max_pull)
    }

    pub fn reaches_threshold(&self, resisted: f64) -> bool {
        resisted + THRESHOLD_EPSILON >= self.threshold
    }
}
