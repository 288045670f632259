use super::AngleFilter;

/// Exponential smoothing filter
#[derive(Debug)]
pub struct ExponentialFilter {
    alpha: f64,
    last: Option<f64>,
}

impl ExponentialFilter {
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha, last: None }
    }
}

impl AngleFilter for ExponentialFilter {
    fn apply(&mut self, angle: f64) -> f64 {
        let filtered = match self.last {
            Some(last) => self.alpha * angle + (1.0 - self.alpha) * last,
            None => angle,
        };
        self.last = Some(filtered);
        filtered
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}
