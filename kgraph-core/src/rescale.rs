// Popularity to node size rescaling

use crate::error::{GraphError, Result};

/// Display range for article node sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(GraphError::InvalidSizeRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self {
            min: 30.0,
            max: 70.0,
        }
    }
}

/// Linearly map `values` into `range`. The output is aligned by position with
/// the input; when every value is equal each maps to the midpoint.
pub fn rescale(values: &[f64], range: SizeRange) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let (low, high) = values
        .iter()
        .fold((first, first), |(low, high), &v| (low.min(v), high.max(v)));
    let span = high - low;

    if span <= 0.0 || !span.is_finite() {
        return vec![range.midpoint(); values.len()];
    }

    values
        .iter()
        .map(|&v| {
            let scaled = (v - low) / span * (range.max - range.min) + range.min;
            scaled.clamp(range.min, range.max)
        })
        .collect()
}
