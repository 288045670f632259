//! Smoothing filters for the measured joint angle signal.
//!
//! Pose detectors jitter frame to frame; an optional filter sits between the
//! form analyzer and the repetition tracker so threshold crossings reflect
//! movement rather than noise. The default is no filtering.

/// Moving average filter for simple smoothing
pub mod moving_average;

/// Median filter for outlier rejection
pub mod median;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{Error, Result};

/// Trait for all angle filters
pub trait AngleFilter: Send + Sync + std::fmt::Debug {
    /// Apply filter to the measured angle in degrees
    fn apply(&mut self, angle: f64) -> f64;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes the angle through unchanged
#[derive(Debug)]
pub struct NoFilter;

impl AngleFilter for NoFilter {
    fn apply(&mut self, angle: f64) -> f64 {
        angle
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create an angle filter from a spec string.
///
/// Accepts a bare name (`"median"`) or a name with parameters separated by
/// colons (`"moving_average:5"`, `"exponential:0.4"`).
///
/// # Errors
///
/// Returns [`Error::FilterError`] for unknown names or unparseable
/// parameters.
pub fn create_filter(spec: &str) -> Result<Box<dyn AngleFilter>> {
    let mut parts = spec.split(':');
    let name = parts.next().unwrap_or_default().to_lowercase();
    let param = parts.next();

    match name.as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "moving_average" | "movingaverage" => {
            let window = parse_param(param, 5)?;
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)))
        }
        "median" => {
            let window = parse_param(param, 5)?;
            Ok(Box::new(median::MedianFilter::new(window)))
        }
        "exponential" => {
            let alpha = parse_param(param, 0.5)?;
            if !(0.0..=1.0).contains(&alpha) || alpha == 0.0 {
                return Err(Error::FilterError(format!(
                    "exponential alpha must be in (0, 1], got {alpha}"
                )));
            }
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {spec}"))),
    }
}

fn parse_param<T: std::str::FromStr>(param: Option<&str>, default: T) -> Result<T> {
    match param {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::FilterError(format!("Invalid filter parameter: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter() {
        let mut filter = NoFilter;
        assert_eq!(filter.apply(42.5), 42.5);
    }

    #[test]
    fn test_create_filter() {
        assert!(create_filter("none").is_ok());
        assert!(create_filter("moving_average").is_ok());
        assert!(create_filter("moving_average:3").is_ok());
        assert!(create_filter("median:7").is_ok());
        assert!(create_filter("exponential:0.3").is_ok());
        assert!(create_filter("unknown").is_err());
        assert!(create_filter("moving_average:abc").is_err());
        assert!(create_filter("exponential:1.5").is_err());
    }
}
