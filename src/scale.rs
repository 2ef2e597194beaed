//! Category (band) and value scales.
//!
//! Both scales are plain values: build once per chart, then query. Pixel
//! positions are relative to the plot area, with `y = 0` at the top.

use crate::error::{ChartError, Result};
use crate::ir::ScaleKind;

/// Rounds halves upward, matching `Math.round`.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Equal-width horizontal bands, one per category, with rounded positions.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    labels: Vec<String>,
    offsets: Vec<f64>,
    band_width: f64,
    step: f64,
}

impl BandScale {
    /// `padding` is the fraction of each step left empty between bands; the
    /// same fraction is used for the outer padding at both ends.
    pub fn new(labels: Vec<String>, width: f64, padding: f64) -> Self {
        let n = labels.len() as f64;
        if labels.is_empty() || width <= 0.0 {
            return Self {
                offsets: vec![0.0; labels.len()],
                labels,
                band_width: 0.0,
                step: 0.0,
            };
        }
        let padding = padding.clamp(0.0, 1.0);
        let outer = padding;
        let step = (width / (n - padding + 2.0 * outer)).floor();
        let error = width - (n - padding) * step;
        let start = round_half_up(error / 2.0);
        let offsets = (0..labels.len()).map(|i| start + step * i as f64).collect();
        Self {
            labels,
            offsets,
            band_width: round_half_up(step * (1.0 - padding)),
            step,
        }
    }

    pub fn band(&self, label: &str) -> Result<f64> {
        self.labels
            .iter()
            .position(|candidate| candidate == label)
            .map(|idx| self.offsets[idx])
            .ok_or_else(|| ChartError::UnknownCategory {
                label: label.to_string(),
            })
    }

    pub fn band_width(&self) -> f64 {
        self.band_width
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn bands(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.offsets.iter().copied())
    }
}

/// Maps a value domain onto `[pixel_height, 0]`, optionally through a
/// sign-preserving power transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    min: f64,
    max: f64,
    pixel_height: f64,
    exponent: f64,
    t_min: f64,
    t_max: f64,
}

impl ValueScale {
    pub fn new(min: f64, max: f64, pixel_height: f64, kind: ScaleKind) -> Result<Self> {
        let exponent = kind.exponent();
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(ChartError::InvalidScale(format!(
                "exponent must be positive, got {exponent}"
            )));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidScale(format!(
                "domain must be finite, got [{min}, {max}]"
            )));
        }
        let mut scale = Self {
            min,
            max,
            pixel_height,
            exponent,
            t_min: 0.0,
            t_max: 0.0,
        };
        scale.t_min = scale.transform(min);
        scale.t_max = scale.transform(max);
        Ok(scale)
    }

    pub fn linear(min: f64, max: f64, pixel_height: f64) -> Result<Self> {
        Self::new(min, max, pixel_height, ScaleKind::Linear)
    }

    fn transform(&self, value: f64) -> f64 {
        if self.exponent == 1.0 {
            value
        } else if value < 0.0 {
            -(-value).powf(self.exponent)
        } else {
            value.powf(self.exponent)
        }
    }

    /// Pixel offset for `value`. Larger values sit higher (smaller offsets).
    pub fn y(&self, value: f64) -> f64 {
        let span = self.t_max - self.t_min;
        if span == 0.0 {
            return self.pixel_height;
        }
        let t = (self.transform(value) - self.t_min) / span;
        self.pixel_height * (1.0 - t)
    }

    pub fn baseline(&self) -> f64 {
        self.y(0.0)
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn pixel_height(&self) -> f64 {
        self.pixel_height
    }

    /// Step between "nice" ticks when asking for roughly `count` of them.
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let span = hi - lo;
        if span <= 0.0 || !span.is_finite() || count == 0 {
            return None;
        }
        let count = count as f64;
        let power = (span / count).log10().floor();
        let mut step = if power >= 0.0 {
            10f64.powf(power)
        } else {
            1.0 / 10f64.powf(-power)
        };
        let err = count / span * step;
        if err <= 0.15 {
            step *= 10.0;
        } else if err <= 0.35 {
            step *= 5.0;
        } else if err <= 0.75 {
            step *= 2.0;
        }
        Some(step)
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let Some(step) = self.tick_step(count) else {
            return vec![self.min];
        };
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Decimal places implied by a tick step: `1000 -> 0`, `0.5 -> 1`.
pub fn tick_precision(step: f64) -> usize {
    if step <= 0.0 || !step.is_finite() {
        return 0;
    }
    let digits = -(step.log10() + 0.01).floor();
    digits.max(0.0) as usize
}

/// Formats a tick with thousands separators, e.g. `24500 -> "24,500"`.
pub fn format_tick(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}
