//! Sample generation for one axis of a sweep

use multiples_params::{NumberType, RangeConfig, ValueRange};
use multiples_text::parse_int_prefix;

/// Resolved sampling parameters for one axis
///
/// Produced from a literal's text, a fallback count and its optional
/// [`RangeConfig`]. Every field is usable: bounds that do not parse fall back
/// to the value-derived default range, a zero or unparseable count to the
/// fallback count, and a negative count resets both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSpec {
    /// Inclusive bounds, `min <= max`
    pub range: ValueRange,
    /// Number of samples, at least one
    pub count: usize,
    /// Numeric kind of the samples
    pub number_type: NumberType,
}

impl SampleSpec {
    /// Resolve sampling for a literal
    #[must_use]
    pub fn resolve(value: &str, default_count: usize, custom: Option<&RangeConfig>) -> Self {
        let default_count = default_count.max(1);
        let Some(custom) = custom else {
            return Self {
                range: ValueRange::around_literal(value),
                count: default_count,
                number_type: NumberType::default(),
            };
        };

        // A negative count discards the custom bounds too; zero or no digits
        // only replaces the count.
        if parse_int_prefix(&custom.count).is_some_and(|n| n < 0) {
            return Self {
                range: ValueRange::around_literal(value),
                count: default_count,
                number_type: custom.number_type,
            };
        }

        Self {
            range: custom
                .bounds()
                .filter(|r| r.min.is_finite() && r.max.is_finite())
                .unwrap_or_else(|| ValueRange::around_literal(value)),
            count: custom.sample_count().unwrap_or(default_count),
            number_type: custom.number_type,
        }
    }

    /// Evenly spaced samples, formatted for splicing
    #[must_use]
    pub fn samples(&self) -> Vec<String> {
        self.first_samples(self.count)
    }

    /// The first `n` of [`Self::samples`]
    ///
    /// Spacing still follows `count`, so a prefix never differs from the
    /// start of the full run.
    #[must_use]
    pub fn first_samples(&self, n: usize) -> Vec<String> {
        let (mut min, mut max) = (self.range.min, self.range.max);
        if self.number_type == NumberType::Int {
            min = round_half_up(min);
            max = round_half_up(max);
        }

        let step = if self.count > 1 {
            (max - min) / (self.count - 1) as f64
        } else {
            0.0
        };
        (0..self.count.min(n))
            .map(|i| self.format(min + step * i as f64))
            .collect()
    }

    fn format(&self, sample: f64) -> String {
        match self.number_type {
            NumberType::Int => format_int(sample),
            NumberType::Float => format_fixed2(sample),
        }
    }
}

/// Samples for a literal, see [`SampleSpec::resolve`]
///
/// # Example
/// ```
/// # use multiples_sweep::generate_variations;
/// assert_eq!(generate_variations("0", 4, None), vec!["0.00", "33.33", "66.67", "100.00"]);
/// ```
#[must_use]
pub fn generate_variations(
    value: &str,
    default_count: usize,
    custom: Option<&RangeConfig>,
) -> Vec<String> {
    SampleSpec::resolve(value, default_count, custom).samples()
}

// Rounds halves towards positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn format_int(sample: f64) -> String {
    let rounded = round_half_up(sample);
    // Avoid printing "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

fn format_fixed2(sample: f64) -> String {
    // Clean accumulated step error first so 0.145000000001 and 0.144999999999
    // land on the same side.
    let cleaned = format!("{sample:.10}").parse::<f64>().unwrap_or(sample);
    let hundredths = (cleaned.abs() * 100.0).round() / 100.0;
    // Negative values keep their sign even when they round to zero; -0 does not.
    if cleaned < 0.0 {
        format!("-{hundredths:.2}")
    } else {
        format!("{hundredths:.2}")
    }
}
