//! Scale functions for data-to-pixel mappings.
//!
//! The chart uses two linear scales computed once from the *full* dataset, so filtering
//! never moves the coordinate system. The X domain floor is padded to keep the leftmost
//! marks off the axis; the Y range is inverted because screen Y grows downward.

use crate::dataset::{Record, Stat};
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
///
/// No clamping: values outside the domain extrapolate linearly. A collapsed domain (min
/// equal to max) maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if either domain bound is not finite.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain bounds must be finite".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Whether the domain has collapsed to a single value.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        (self.domain_max - self.domain_min).abs() < f32::EPSILON
    }

    /// Spacing between "nice" ticks for roughly `count` ticks over the domain.
    ///
    /// The step is 1, 2 or 5 times a power of ten, or 0 for a collapsed domain.
    #[must_use]
    pub fn tick_step(&self, count: usize) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let (lo, hi) = self.sorted_domain();
        tick_spec(lo, hi, count as f64).step()
    }

    /// Round tick values inside the domain, ascending. A collapsed domain has one tick.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        if count == 0 {
            return Vec::new();
        }
        if self.is_degenerate() {
            return vec![self.domain_min];
        }
        let (lo, hi) = self.sorted_domain();
        let spec = tick_spec(lo, hi, count as f64);
        if spec.last < spec.first {
            return Vec::new();
        }

        let n = (spec.last - spec.first) as usize + 1;
        (0..n).map(|i| spec.value(spec.first + i as f64) as f32).collect()
    }

    fn sorted_domain(&self) -> (f64, f64) {
        let (a, b) = (f64::from(self.domain_min), f64::from(self.domain_max));
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = if self.is_degenerate() {
            0.5
        } else {
            (value - self.domain_min) / (self.domain_max - self.domain_min)
        };
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Tick positions are `index * increment`, or `index / inverse` for sub-unit steps so
/// fractional ticks stay exact (0.3, not 0.30000000000000004).
#[derive(Debug, Clone, Copy)]
struct TickSpec {
    first: f64,
    last: f64,
    increment: f64,
    inverse: Option<f64>,
}

impl TickSpec {
    fn step(&self) -> f64 {
        self.inverse.map_or(self.increment, |inv| 1.0 / inv)
    }

    fn value(&self, index: f64) -> f64 {
        self.inverse.map_or(index * self.increment, |inv| index / inv)
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> TickSpec {
    let raw = (stop - start) / count.max(1.0);
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        let mut first = (start * inv).round();
        let mut last = (stop * inv).round();
        if first / inv < start {
            first += 1.0;
        }
        if last / inv > stop {
            last -= 1.0;
        }
        TickSpec { first, last, increment: 1.0 / inv, inverse: Some(inv) }
    } else {
        let increment = 10f64.powf(power) * factor;
        let mut first = (start / increment).round();
        let mut last = (stop / increment).round();
        if first * increment < start {
            first += 1.0;
        }
        if last * increment > stop {
            last -= 1.0;
        }
        TickSpec { first, last, increment, inverse: None }
    }
}

/// Format a tick label with the precision implied by `step` and comma thousands grouping.
#[must_use]
pub fn format_tick(value: f32, step: f64) -> String {
    let precision = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10() - 1e-9).ceil() as usize
    };
    let formatted = format!("{:.*}", precision, f64::from(value));

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        // "-0" is not a useful label.
        Some(rest) if rest.chars().any(|c| c.is_ascii_digit() && c != '0') => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn extent(values: impl Iterator<Item = f32>) -> Option<(f32, f32)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Compute the X and Y scales for the chart from the full record set.
///
/// X: `[min - x_padding, max]` onto `[0, width]`. Y: `[min, max]` onto `[height, 0]`.
///
/// # Errors
///
/// [`Error::EmptyData`] when no record carries both stats. A stat that is constant across
/// the records yields a collapsed scale rather than an error.
pub fn compute_scales(
    records: &[Record],
    x: Stat,
    y: Stat,
    width: u32,
    height: u32,
    x_padding: f32,
) -> Result<(LinearScale, LinearScale)> {
    let (x_min, x_max) =
        extent(records.iter().filter_map(|r| r.stat(x))).ok_or(Error::EmptyData)?;
    let (y_min, y_max) =
        extent(records.iter().filter_map(|r| r.stat(y))).ok_or(Error::EmptyData)?;

    let x_scale = LinearScale::new((x_min - x_padding, x_max), (0.0, width as f32))?;
    let y_scale = LinearScale::new((y_min, y_max), (height as f32, 0.0))?;

    Ok((x_scale, y_scale))
}
